use std::convert::TryFrom;

use cc_config::load_cells_file;
use cc_core_builder::{SudtTransactionBuilder, TransactionBuilder};
use cc_protocol::ckb_jsonrpc_types::TransactionView as JsonTxView;
use cc_protocol::types::amount::parse_amount;
use cc_protocol::types::config::CcConfig;
use cc_protocol::types::handler::HandlerContext;
use cc_protocol::types::input::TransactionInput;
use cc_protocol::types::item::Item;
use cc_protocol::types::multisig::MultisigConfig;
use cc_protocol::types::script_group::JsonScriptGroup;
use cc_protocol::types::transaction::TransactionWithScriptGroups;
use cc_protocol::{log, serde_json, CcResult, Logger};
use clap::{crate_version, Arg, ArgMatches, Command};

mod error;
use error::CliError;


fn main() -> CcResult<()> {
    // initail Command line options
    let matches = Command::new("cc-collector")
        .version(crate_version!())
        .arg(
            Arg::new("config_path")
                .short('c')
                .long("config")
                .help("Collector config path")
                .required(true)
                .takes_value(true),
        )
        .subcommand(
            Command::new("build")
                .about("Build a CKB transfer draft")
                .arg(receiver_arg())
                .arg(
                    Arg::new("capacity")
                        .long("capacity")
                        .help("Capacity in shannons")
                        .required(true)
                        .takes_value(true)
                        .validator(|value| value.parse::<u64>()),
                ),
        )
        .subcommand(
            Command::new("sudt")
                .about("Build a sUDT transfer draft")
                .arg(receiver_arg())
                .arg(
                    Arg::new("amount")
                        .long("amount")
                        .help("Token amount")
                        .required(true)
                        .takes_value(true),
                ),
        )
        .subcommand_required(true)
        .get_matches();

    // initail log system
    log::set_boxed_logger(Box::new(Logger))
        .map(|_| log::set_max_level(log::LevelFilter::Info))
        .expect("logger");

    let config_path = matches.value_of("config_path").unwrap();
    let config = cc_config::load_file(config_path)?;
    let cells = load_cells_file(&config.cells_path)?;
    log::info!("loaded {} cells from {}", cells.len(), config.cells_path);

    let draft = match matches.subcommand() {
        Some(("build", sub_matches)) => build_transfer(&config, cells, sub_matches)?,
        Some(("sudt", sub_matches)) => build_sudt(&config, cells, sub_matches)?,
        _ => unreachable!("subcommand is required"),
    };

    let output = render_draft(draft)?;
    println!("{}", output);
    Ok(())
}

/// Pretty JSON of the draft transaction and its script groups.
fn render_draft(draft: TransactionWithScriptGroups) -> CcResult<String> {
    let script_groups = draft
        .script_groups
        .iter()
        .map(JsonScriptGroup::from)
        .collect::<Vec<_>>();
    let output = serde_json::json!({
        "transaction": JsonTxView::from(draft.tx_view),
        "script_groups": script_groups,
    });
    serde_json::to_string_pretty(&output)
        .map_err(|err| CliError::SerializingDraft(err.to_string()).into())
}

fn receiver_arg<'a>() -> Arg<'a> {
    Arg::new("to")
        .long("to")
        .help("Receiver address")
        .required(true)
        .takes_value(true)
}

fn handler_context(config: &CcConfig) -> CcResult<Option<HandlerContext>> {
    match &config.multisig {
        Some(multisig) => Ok(Some(MultisigConfig::try_from(multisig)?.into())),
        None => Ok(None),
    }
}

fn build_transfer(
    config: &CcConfig,
    cells: Vec<TransactionInput>,
    matches: &ArgMatches,
) -> CcResult<TransactionWithScriptGroups> {
    let receiver = matches.value_of("to").unwrap();
    let capacity = matches
        .value_of_t::<u64>("capacity")
        .unwrap_or_else(|err| err.exit());

    let mut builder = TransactionBuilder::new(config.network, cells.into_iter());
    builder.set_fee_rate(config.fee_rate);
    builder.add_sender(Item::new_address_item(&config.sender))?;
    if let Some(context) = handler_context(config)? {
        builder.add_handler_context(context);
    }
    builder.add_output_by_address(receiver, capacity)?;
    builder.add_change_output_by_address(&config.sender)?;
    builder.build()
}

fn build_sudt(
    config: &CcConfig,
    cells: Vec<TransactionInput>,
    matches: &ArgMatches,
) -> CcResult<TransactionWithScriptGroups> {
    let receiver = matches.value_of("to").unwrap();
    let amount = parse_amount(matches.value_of("amount").unwrap())?;

    let cells = cells.into_iter();
    let mut builder = match &config.sudt_args {
        Some(sudt_args) => {
            SudtTransactionBuilder::from_sudt_args(config.network, cells, sudt_args.clone())
        }
        None => SudtTransactionBuilder::from_owner_address(config.network, cells, &config.sender)?,
    };
    builder.set_fee_rate(config.fee_rate);
    builder.add_sender(Item::new_address_item(&config.sender))?;
    if let Some(context) = handler_context(config)? {
        builder.add_handler_context(context);
    }
    builder.add_sudt_output_by_address(receiver, amount)?;
    builder.add_change_output_by_address(&config.sender)?;
    builder.build()
}
