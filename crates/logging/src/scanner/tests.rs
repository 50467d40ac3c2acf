use super::*;
use proptest::prelude::*;

fn args(tokens: &[&str]) -> Vec<String> {
    tokens.iter().map(|token| (*token).to_owned()).collect()
}

fn short_flags() -> FlagScanner {
    FlagScanner::new().with_verbose("-v").with_quiet("-q")
}

#[test]
fn bundled_cluster_is_consumed_and_removed() {
    let scanner = short_flags().bundle(true).remove(true);
    let mut tokens = args(&["--foo", "-qvv", "--bar"]);
    assert_eq!(scanner.scan(&mut tokens), -1);
    assert_eq!(tokens, ["--foo", "--bar"]);
}

#[test]
fn counts_without_removal_leave_tokens_untouched() {
    let scanner = short_flags().bundle(true);
    let mut tokens = args(&["-v", "x", "-qvv", "-q"]);
    assert_eq!(scanner.scan(&mut tokens), -1);
    assert_eq!(tokens, ["-v", "x", "-qvv", "-q"]);
}

#[test]
fn clusters_are_ignored_without_bundling() {
    let scanner = short_flags().remove(true);
    let mut tokens = args(&["-vv", "-v"]);
    assert_eq!(scanner.scan(&mut tokens), -1);
    assert_eq!(tokens, ["-vv"]);
}

#[test]
fn stop_pattern_prevents_later_inspection() {
    let scanner = short_flags().with_stop("--").remove(true);
    let mut tokens = args(&["-v", "--", "-v", "-q"]);
    assert_eq!(scanner.scan(&mut tokens), -1);
    assert_eq!(tokens, ["--", "-v", "-q"]);
}

#[test]
fn partially_consumed_cluster_is_recollapsed() {
    let scanner = short_flags().bundle(true).remove(true);
    let mut tokens = args(&["-qx", "-avb", "-xyz"]);
    assert_eq!(scanner.scan(&mut tokens), 0);
    assert_eq!(tokens, ["-x", "-ab", "-xyz"]);
}

#[test]
fn cluster_without_removal_is_counted_but_kept() {
    let scanner = short_flags().bundle(true);
    let mut tokens = args(&["-qx"]);
    assert_eq!(scanner.scan(&mut tokens), 1);
    assert_eq!(tokens, ["-qx"]);
}

#[test]
fn stop_inside_cluster_ends_outer_scan_after_reassembly() {
    let scanner = short_flags().with_stop("-s").bundle(true).remove(true);
    let mut tokens = args(&["-vsv", "-q"]);
    assert_eq!(scanner.scan(&mut tokens), -1);
    assert_eq!(tokens, ["-sv", "-q"]);
}

#[test]
fn long_options_and_assignments_are_not_clusters() {
    let scanner = short_flags().bundle(true).remove(true);
    let mut tokens = args(&["--vv", "-v=q", "-v-q", "-", "-v"]);
    assert_eq!(scanner.scan(&mut tokens), -1);
    assert_eq!(tokens, ["--vv", "-v=q", "-v-q", "-"]);
}

#[test]
fn adjacent_removals_keep_indices_stable() {
    let scanner = short_flags().remove(true);
    let mut tokens = args(&["-v", "-v", "-q", "keep", "-v", "-v"]);
    assert_eq!(scanner.scan(&mut tokens), -3);
    assert_eq!(tokens, ["keep"]);
}

#[test]
fn regex_patterns_match_tokens() {
    let scanner = FlagScanner::new()
        .with_verbose(Pattern::regex("^--verb(ose)?$").expect("compiles"))
        .with_quiet(PatternSet::parse(["-q", "/^--(quiet|silent)$/"]).expect("parses"))
        .remove(true);
    let mut tokens = args(&["--verb", "--silent", "--quiet", "--verbose", "--verbosity"]);
    assert_eq!(scanner.scan(&mut tokens), 0);
    assert_eq!(tokens, ["--verbosity"]);
}

#[test]
fn empty_scanner_matches_nothing() {
    let scanner = FlagScanner::new().bundle(true).remove(true);
    let mut tokens = args(&["-v", "-qvv", "--"]);
    assert_eq!(scanner.scan(&mut tokens), 0);
    assert_eq!(tokens, ["-v", "-qvv", "--"]);
}

#[test]
fn standard_scanner_recognises_long_forms_and_stops() {
    let scanner = FlagScanner::standard();
    assert!(scanner.bundles());
    assert!(!scanner.removes());
    let mut tokens = args(&["--verbose", "-vv", "--quiet", "--", "-q"]);
    assert_eq!(scanner.scan(&mut tokens), -2);
}

#[test]
fn missing_token_sequence_is_an_argument_error() {
    let scanner = short_flags();
    assert!(matches!(scanner.scan_opt(None), Err(LevelError::Argument(_))));

    let mut tokens = args(&["-q"]);
    assert_eq!(scanner.scan_opt(Some(&mut tokens)), Ok(1));
}

#[test]
fn collapse_preserves_multibyte_flags() {
    let scanner = short_flags().bundle(true).remove(true);
    let mut tokens = args(&["-vé"]);
    assert_eq!(scanner.scan(&mut tokens), -1);
    assert_eq!(tokens, ["-é"]);
}

fn flag_token() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("-v".to_owned()),
        Just("-q".to_owned()),
        Just("file".to_owned()),
        Just("--long".to_owned()),
        "-[vqx]{2,4}",
    ]
}

proptest! {
    #[test]
    fn removal_does_not_change_the_offset(tokens in proptest::collection::vec(flag_token(), 0..16)) {
        let counting = short_flags().bundle(true);
        let consuming = short_flags().bundle(true).remove(true);

        let mut kept = tokens.clone();
        let mut consumed = tokens.clone();
        prop_assert_eq!(counting.scan(&mut kept), consuming.scan(&mut consumed));
        prop_assert_eq!(&kept, &tokens);
    }

    #[test]
    fn offset_is_quiet_minus_verbose(tokens in proptest::collection::vec(flag_token(), 0..16)) {
        let quiet: i32 = tokens.iter().map(|t| t.matches('q').count() as i32).sum();
        let verbose: i32 = tokens.iter().map(|t| t.matches('v').count() as i32).sum();
        let mut scanned = tokens.clone();
        prop_assert_eq!(short_flags().bundle(true).scan(&mut scanned), quiet - verbose);
    }

    #[test]
    fn consumed_vectors_hold_no_verbose_or_quiet_flags(tokens in proptest::collection::vec(flag_token(), 0..16)) {
        let mut scanned = tokens.clone();
        short_flags().bundle(true).remove(true).scan(&mut scanned);
        for token in &scanned {
            prop_assert!(!token.contains(['v', 'q']), "left {token}");
        }
        let plain = |list: &[String]| list.iter().filter(|t| *t == "file" || *t == "--long").count();
        prop_assert_eq!(plain(&scanned), plain(&tokens));
    }
}
