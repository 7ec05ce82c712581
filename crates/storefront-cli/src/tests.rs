use clap::Parser;

use super::*;

#[test]
fn parses_listing_with_page_args() {
    let cli = Cli::try_parse_from(["storefront-cli", "discounted", "--page", "2", "--page-size", "16"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::Discounted(PageArgs {
            page: Some(2),
            page_size: Some(16)
        })
    ));
}

#[test]
fn listing_args_are_optional() {
    let cli = Cli::try_parse_from(["storefront-cli", "new"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::New(PageArgs {
            page: None,
            page_size: None
        })
    ));
}

#[test]
fn parses_search_command() {
    let cli = Cli::try_parse_from([
        "storefront-cli",
        "search",
        "--category",
        "3",
        "--term",
        "linen shirt",
    ])
    .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::Search {
            category: Some(ref c),
            term: Some(ref t),
            page: None,
        } if c == "3" && t == "linen shirt"
    ));
}

#[test]
fn parses_brand_template() {
    let cli = Cli::try_parse_from(["storefront-cli", "brand", "--template", "home"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::Brand { template: Some(ref t) } if t == "home"
    ));
}

#[test]
fn parses_home_and_categories() {
    let home = Cli::try_parse_from(["storefront-cli", "home"]).unwrap();
    assert!(matches!(home.command, Commands::Home));
    let cats = Cli::try_parse_from(["storefront-cli", "categories"]).unwrap();
    assert!(matches!(cats.command, Commands::Categories));
}

#[test]
fn subcommand_is_required() {
    assert!(Cli::try_parse_from(["storefront-cli"]).is_err());
}

#[test]
fn rejects_non_numeric_page() {
    assert!(Cli::try_parse_from(["storefront-cli", "top", "--page", "first"]).is_err());
}
