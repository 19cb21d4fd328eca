//! End-to-end compile of a real documentation site's redirect list.

use rc_compiler::{
    build_table_json, compile_redirects, parse_redirect_list, parse_table, CompileOptions, InputFormat, ParseError,
    VerifyPolicy,
};
use rc_core::{InputError, Redirect, Strategy};

const FIXTURE: &str = include_str!("fixtures/docs_redirects.json");

fn load() -> Vec<Redirect> {
    parse_redirect_list(FIXTURE, InputFormat::Json).expect("fixture should parse")
}

#[test]
fn iterative_compiles_clean() {
    let redirects = load();
    assert_eq!(redirects.len(), 174);

    let out = compile_redirects(&redirects, &CompileOptions::default()).expect("compile should pass verification");
    assert_eq!(out.stats.rules_before, 174);
    assert_eq!(out.stats.absolute, 4);
    assert_eq!(out.stats.rules_after, 96);
    assert_eq!(out.stats.prefix, 10);
    assert!(out.errors.is_empty());
    assert!(out.table.verify(&redirects).is_empty());
}

#[test]
fn legacy_compiles_clean() {
    let options = CompileOptions {
        strategy: Strategy::Legacy,
        ..CompileOptions::default()
    };
    let out = compile_redirects(&load(), &options).expect("compile should pass verification");
    assert_eq!(out.stats.rules_after, 105);
    assert_eq!(out.stats.prefix, 13);
}

#[test]
fn cross_check_agrees() {
    let options = CompileOptions {
        strategy: Strategy::Iterative,
        policy: VerifyPolicy::Fail,
        cross_check: true,
    };
    let out = compile_redirects(&load(), &options).unwrap();
    let report = out.cross_check.expect("cross-check should run");
    assert_eq!(report.strategy, Strategy::Legacy);
    assert!(report.errors.is_empty());
    assert!(out.stats.rules_after < report.stats.rules_after);
}

#[test]
fn nested_groups_resolve_most_specific_first() {
    let out = compile_redirects(&load(), &CompileOptions::default()).unwrap();
    let table = out.table;

    assert!(table.rules().contains(&Redirect::prefix("/ref/app", "/guides/app")));
    assert!(table
        .rules()
        .contains(&Redirect::prefix("/ref/app/pages/settings-page", "/guides/app/settings-page")));

    assert_eq!(
        table.resolve("/ref/app/pages/settings-page/emails").as_deref(),
        Some("/guides/app/settings-page/emails")
    );
    assert_eq!(
        table.resolve("/ref/app/pages/project-page").as_deref(),
        Some("/guides/app/pages/project-page")
    );
    assert_eq!(
        table.resolve("/company").as_deref(),
        Some("https://wandb.ai/site/company")
    );
}

#[test]
fn written_table_reads_back() {
    let redirects = load();
    let out = compile_redirects(&redirects, &CompileOptions::default()).unwrap();
    let json = build_table_json(&out.table).unwrap();

    let table = parse_table(&json).unwrap();
    assert_eq!(table, out.table);
    assert!(table.verify(&redirects).is_empty());
}

#[test]
fn written_table_is_rejected_as_source_list() {
    let out = compile_redirects(&load(), &CompileOptions::default()).unwrap();
    let json = build_table_json(&out.table).unwrap();

    let err = parse_redirect_list(&json, InputFormat::Json).unwrap_err();
    assert!(matches!(err, ParseError::Input(InputError::PrefixRuleInSource { .. })));
}
