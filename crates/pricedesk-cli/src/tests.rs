use super::*;

#[test]
fn parses_top_with_defaults() {
    let cli = Cli::try_parse_from(["pricedesk-cli", "top"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::Top {
            selection: SelectionArgs {
                category: None,
                count: None
            }
        }
    ));
}

#[test]
fn parses_top_with_category_and_count() {
    let cli = Cli::try_parse_from([
        "pricedesk-cli",
        "top",
        "--category",
        "laptops",
        "-n",
        "5",
    ])
    .expect("expected valid cli args");
    match cli.command {
        Commands::Top { selection } => {
            assert_eq!(selection.category.as_deref(), Some("laptops"));
            assert_eq!(selection.count, Some(5));
        }
        Commands::Raise { .. } => panic!("expected top"),
    }
}

#[test]
fn parses_raise_with_decimal_percentage() {
    let cli = Cli::try_parse_from(["pricedesk-cli", "raise", "--percentage", "12.5"])
        .expect("expected valid cli args");
    match cli.command {
        Commands::Raise { percentage, .. } => {
            assert_eq!(percentage, Some(Decimal::new(125, 1)));
        }
        Commands::Top { .. } => panic!("expected raise"),
    }
}

#[test]
fn raise_accepts_negative_percentage_for_policy_to_reject() {
    let cli = Cli::try_parse_from(["pricedesk-cli", "raise", "-p", "-5"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::Raise {
            percentage: Some(p),
            ..
        } if p == Decimal::from(-5)
    ));
}

#[test]
fn raise_rejects_non_numeric_percentage() {
    let result = Cli::try_parse_from(["pricedesk-cli", "raise", "--percentage", "ten"]);
    assert!(result.is_err());
}

#[test]
fn credentials_are_global_flags() {
    let cli = Cli::try_parse_from([
        "pricedesk-cli",
        "top",
        "--username",
        "emilys",
        "--password",
        "emilyspass",
    ])
    .expect("expected valid cli args");
    assert_eq!(cli.username.as_deref(), Some("emilys"));
    assert_eq!(cli.password.as_deref(), Some("emilyspass"));
}

#[test]
fn subcommand_is_required() {
    assert!(Cli::try_parse_from(["pricedesk-cli"]).is_err());
}

#[test]
fn selection_falls_back_to_config_defaults() {
    let config = pricedesk_core::load_app_config_from_env().expect("default config");
    let selection = SelectionArgs {
        category: None,
        count: Some(7),
    }
    .resolve(&config);
    assert_eq!(selection.category, config.default_category);
    assert_eq!(selection.count, 7);
}
