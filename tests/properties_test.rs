//! Property tests for the sanitizer and limit enforcement.

use std::sync::LazyLock;

use proptest::prelude::*;
use regex::Regex;

use panelmark::{
    AllowList, Limits, Policy, TextStats, clip_paste, enforce, html_to_plain_text, sanitize,
};

/// Every tag the sanitizer may emit, with the only attributes it may carry.
static EMITTED_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^(?:</?(?:b|i|u|s|br|strong|em|span|details|summary|div)>|<span style="[a-z:; -]+">|<details class="spoiler">)$"#,
    )
    .unwrap()
});

static ANY_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

static TAG_NAME: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"</?([a-z]+)").unwrap());

/// Fragments built from markup a rich editor or clipboard typically produces.
fn fragment() -> impl Strategy<Value = String> {
    let token = prop::sample::select(vec![
        "word",
        " ",
        "AT&T",
        "1 < 2",
        "&amp;",
        "&nbsp;",
        "||",
        "<b>",
        "</b>",
        "<i>",
        "</i>",
        "<u>",
        "</u>",
        "<strike>",
        "</strike>",
        "<em>",
        "</em>",
        "<br>",
        "<div>",
        "</div>",
        "<p>",
        "</p>",
        r#"<span style="font-weight: bold; color: red">"#,
        r#"<span class="x">"#,
        "</span>",
        r#"<a href="javascript:alert(1)" onclick="x()">"#,
        "</a>",
        "<font face=Arial>",
        "</font>",
    ]);
    prop::collection::vec(token, 0..24).prop_map(|tokens| tokens.concat())
}

/// Like [`fragment`], with content that must vanish entirely.
fn hostile_fragment() -> impl Strategy<Value = String> {
    let extra = prop::sample::select(vec![
        "<script>alert(1)</script>",
        "<style>*{}</style>",
        r#"<img src=x onerror="alert(1)">"#,
        "<!-- note -->",
        r#"<details class="spoiler" open>"#,
        "<summary>",
        "</details>",
        "<ul><li>",
        "</li></ul>",
        "<h2>",
        "</h2>",
    ]);
    prop::collection::vec(prop_oneof![fragment(), extra.prop_map(String::from)], 0..8)
        .prop_map(|parts| parts.concat())
}

fn policy() -> impl Strategy<Value = Policy> {
    prop_oneof![
        Just(Policy::base()),
        Just(Policy::extended()),
        Just(Policy {
            fold_blocks: false,
            ..Policy::extended()
        }),
    ]
}

fn assert_closed_over(out: &str, allow_list: AllowList) -> Result<(), TestCaseError> {
    for tag in ANY_TAG.find_iter(out) {
        let tag = tag.as_str();
        prop_assert!(EMITTED_TAG.is_match(tag), "unexpected tag {tag} in {out}");
        let name = &TAG_NAME.captures(tag).unwrap()[1];
        prop_assert!(allow_list.allows(name), "{name} not allowed in {out}");
    }
    prop_assert!(!out.contains("onclick"));
    prop_assert!(!out.contains("javascript"));
    Ok(())
}

fn without_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

proptest! {
    #[test]
    fn test_output_closed_over_allow_list(html in hostile_fragment(), policy in policy()) {
        let out = sanitize(&html, &policy);
        assert_closed_over(&out, policy.allow_list)?;
    }

    #[test]
    fn test_arbitrary_input_closed_over_allow_list(html in "\\PC{0,80}", policy in policy()) {
        let out = sanitize(&html, &policy);
        assert_closed_over(&out, policy.allow_list)?;
    }

    #[test]
    fn test_sanitize_is_idempotent(html in hostile_fragment(), policy in policy()) {
        let once = sanitize(&html, &policy);
        let twice = sanitize(&once, &policy);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn test_no_break_runs_longer_than_two(html in hostile_fragment(), policy in policy()) {
        let out = sanitize(&html, &policy);
        prop_assert!(!out.contains("<br><br><br>"));
    }

    #[test]
    fn test_text_is_preserved(html in fragment(), policy in policy()) {
        let out = sanitize(&html, &policy);
        prop_assert_eq!(
            without_whitespace(&html_to_plain_text(&out)),
            without_whitespace(&html_to_plain_text(&html))
        );
    }

    #[test]
    fn test_clip_is_prefix_within_limits(
        text in "[a-z \n]{0,60}",
        max_chars in 0usize..40,
        max_lines in 1usize..6,
    ) {
        let limits = Limits::new(Some(max_chars), Some(max_lines));
        let clipped = limits.clip(&text);
        let stats = TextStats::of_text(clipped);
        prop_assert!(text.starts_with(clipped));
        prop_assert!(stats.chars <= max_chars);
        prop_assert!(stats.lines <= max_lines);
    }

    #[test]
    fn test_enforced_content_within_limits(
        html in fragment(),
        max_chars in 1usize..40,
        max_lines in 1usize..6,
    ) {
        let limits = Limits::new(Some(max_chars), Some(max_lines));
        let enforced = enforce(&sanitize(&html, &Policy::extended()), &limits);
        prop_assert!(!limits.is_exceeded(&TextStats::of_html(&enforced.html)));
    }

    #[test]
    fn test_paste_stays_within_budget(
        current in "[a-z ]{0,20}",
        pasted in "[a-z \n]{0,40}",
        max_chars in 1usize..30,
        max_lines in 1usize..5,
    ) {
        let limits = Limits::new(Some(max_chars), Some(max_lines));
        if let Some(inserted) = clip_paste(&current, &pasted, &limits) {
            prop_assert!(pasted.starts_with(inserted.as_str()));
            let total = format!("{current}{inserted}");
            let stats = TextStats::of_text(&total);
            prop_assert!(stats.chars <= max_chars);
            prop_assert!(stats.lines <= max_lines);
        }
    }
}
