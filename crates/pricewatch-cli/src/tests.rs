use super::*;

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["pricewatch"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn parses_scrape_with_defaults() {
    let cli = Cli::try_parse_from(["pricewatch", "scrape"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Scrape {
            products: None,
            headed: false,
            no_export: false
        })
    ));
}

#[test]
fn parses_scrape_flags() {
    let cli = Cli::try_parse_from([
        "pricewatch",
        "scrape",
        "--products",
        "config/phones.json",
        "--headed",
        "--no-export",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Scrape {
            products: Some(ref p),
            headed: true,
            no_export: true
        }) if p == std::path::Path::new("config/phones.json")
    ));
}

#[test]
fn parses_report_input() {
    let cli = Cli::try_parse_from([
        "pricewatch",
        "report",
        "--input",
        "data/json/products_latest.json",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Report { input: Some(ref p) }) if p.ends_with("products_latest.json")
    ));
}

#[test]
fn parses_schedule_cron_override() {
    let cli = Cli::try_parse_from(["pricewatch", "schedule", "--cron", "0 30 6 * * *"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Schedule { cron: Some(ref c) }) if c == "0 30 6 * * *"
    ));
}

#[test]
fn schedule_without_cron_uses_config() {
    let cli = Cli::try_parse_from(["pricewatch", "schedule"]).unwrap();
    assert!(matches!(cli.command, Some(Commands::Schedule { cron: None })));
}

#[test]
fn unknown_subcommand_is_rejected() {
    assert!(Cli::try_parse_from(["pricewatch", "visualize"]).is_err());
}

#[test]
fn cli_definition_is_consistent() {
    Cli::command().debug_assert();
}
