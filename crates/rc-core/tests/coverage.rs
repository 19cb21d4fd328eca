use std::collections::HashSet;

use proptest::prelude::*;
use rc_core::consolidate::prefix_precedence;
use rc_core::Strategy as Consolidation;
use rc_core::{consolidate, verify_conversion, Redirect};

const SEGMENTS: &[&str] = &["a", "ab", "b", "docs", "guides", "x", ""];

/// Segment indices for `from`, a target shape, and a knob the shape may use.
type Entry = (Vec<usize>, u8, usize);

fn entry() -> impl Strategy<Value = Entry> {
    (
        prop::collection::vec(0..SEGMENTS.len(), 1..=4),
        0u8..5,
        0usize..5,
    )
}

fn build(entries: Vec<Entry>) -> Vec<Redirect> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();

    for (indices, shape, knob) in entries {
        let segs: Vec<&str> = indices.iter().map(|&i| SEGMENTS[i]).collect();
        let from = format!("/{}", segs.join("/"));
        if !seen.insert(from.clone()) {
            continue;
        }

        let to = match shape {
            0 => format!("/moved/{}", segs.join("/")),
            1 => {
                let keep = knob % segs.len();
                format!("/new-{}/{}", segs[..keep].join("-"), segs[keep..].join("/"))
            }
            2 => format!("https://ext.example/{}", segs.join("/")),
            3 => format!("/moved{}", from),
            _ => format!("/other/{}", knob),
        };
        out.push(Redirect::new(from, to));
    }

    out
}

/// Redirect lists with lots of shared prefixes and moved subtrees.
fn redirect_list() -> impl Strategy<Value = Vec<Redirect>> {
    prop::collection::vec(entry(), 0..60).prop_map(build)
}

fn either_strategy() -> impl Strategy<Value = Consolidation> {
    prop_oneof![Just(Consolidation::Iterative), Just(Consolidation::Legacy)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn iterative_output_always_verifies(redirects in redirect_list()) {
        let out = consolidate(&redirects, Consolidation::Iterative).unwrap();
        let rules = out.into_rules();

        let errors = verify_conversion(&redirects, &rules);
        prop_assert!(errors.is_empty(), "{:?}", errors);
        prop_assert!(rules.len() <= redirects.len(), "output grew");
    }

    #[test]
    fn output_tiers_are_ordered(redirects in redirect_list(), strategy in either_strategy()) {
        let out = consolidate(&redirects, strategy).unwrap();

        prop_assert!(out.exact.iter().all(|r| r.exact));
        prop_assert!(out.exact.windows(2).all(|w| w[0].from <= w[1].from));

        prop_assert!(out.prefix.iter().all(|r| !r.exact));
        prop_assert!(out
            .prefix
            .windows(2)
            .all(|w| prefix_precedence(&w[0], &w[1]).is_lt()));
    }

    #[test]
    fn absolute_redirects_survive_unchanged(redirects in redirect_list(), strategy in either_strategy()) {
        let out = consolidate(&redirects, strategy).unwrap();
        for redirect in redirects.iter().filter(|r| r.is_absolute()) {
            prop_assert!(
                out.exact.contains(&redirect.with_exact(true)),
                "{:?} missing from exact rules",
                redirect
            );
        }
        prop_assert!(out.prefix.iter().all(|r| !r.is_absolute()));
    }

    #[test]
    fn grouped_members_rewrite_through_their_rule(redirects in redirect_list()) {
        let out = consolidate(&redirects, Consolidation::Iterative).unwrap();
        let exact_sources: HashSet<&str> = out.exact.iter().map(|r| r.from.as_str()).collect();

        for redirect in redirects.iter().filter(|r| !exact_sources.contains(r.from.as_str())) {
            let covered = out.prefix.iter().any(|rule| {
                redirect
                    .from
                    .strip_prefix(rule.from.as_str())
                    .is_some_and(|rest| redirect.to == format!("{}{}", rule.to, rest))
            });
            prop_assert!(covered, "{:?} has no consistent prefix rule", redirect);
        }
    }
}
