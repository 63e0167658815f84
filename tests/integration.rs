use proptest::prelude::*;
use seqpatch::*;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

proptest! {
    #[test]
    fn test_round_trip(
        old in prop::collection::vec("[a-d]{0,2}", 0..30),
        new in prop::collection::vec("[a-d]{0,2}", 0..30),
    ) {
        let patch = diff(&old, &new);
        prop_assert_eq!(patch.apply_to(&old), Ok(new.clone()));
        prop_assert_eq!(patch.restore(&new), Ok(old));
    }

    #[test]
    fn test_no_op(els in prop::collection::vec(any::<i32>(), 0..30)) {
        let patch = diff(&els, &els);
        prop_assert!(patch.is_empty());
        prop_assert_eq!(patch.apply_to(&els), Ok(els.clone()));
    }

    #[test]
    fn test_unified_round_trip(
        old in prop::collection::vec("[a-c]{1,3}", 0..25),
        new in prop::collection::vec("[a-c]{1,3}", 0..25),
        context in 0..6usize,
    ) {
        let patch = diff(&old, &new);
        let text = generate_unified_diff("a/file", "b/file", &old, &patch, context);
        let parsed = parse_unified_diff(&text).unwrap();
        prop_assert_eq!(parsed.apply_to(&old), Ok(new.clone()));
        prop_assert_eq!(parsed.restore(&new), Ok(old));
    }

    #[test]
    fn test_rows_cover_both_sides(
        old in prop::collection::vec("[ab ]{0,3}", 0..15),
        new in prop::collection::vec("[ab ]{0,3}", 0..15),
    ) {
        let config = DiffRowConfig { column_width: None, ..DiffRowConfig::default() };
        let rows = DiffRowGenerator::new(config).unwrap().generate_diff_rows(&old, &new);
        let old_rows = rows.iter().filter(|r| r.tag != Tag::Insert).count();
        let new_rows = rows.iter().filter(|r| r.tag != Tag::Delete).count();
        prop_assert!(old_rows >= old.len());
        prop_assert!(new_rows >= new.len());
        prop_assert!(rows.len() <= old.len() + new.len());
    }
}

#[test]
fn test_insert_scenario() {
    let a = strings(&["hhh"]);
    let b = strings(&["hhh", "jjj", "kkk"]);
    let patch = diff(&a, &b);
    assert_eq!(patch.len(), 1);
    let delta = &patch.deltas()[0];
    assert_eq!(delta.kind(), DeltaType::Insert);
    assert_eq!(delta.original().position(), 1);
    assert_eq!(delta.revised().lines(), &strings(&["jjj", "kkk"])[..]);
    assert_eq!(patch.apply_to(&a), Ok(b));
}

#[test]
fn test_delete_scenario() {
    let patch = diff(&["ddd", "fff", "ggg"], &["ggg"]);
    assert_eq!(patch.len(), 1);
    let delta = &patch.deltas()[0];
    assert_eq!(delta.kind(), DeltaType::Delete);
    assert_eq!(delta.original().position(), 0);
    assert_eq!(delta.original().lines(), &["ddd", "fff"]);
}

#[test]
fn test_change_scenario() {
    let patch = diff(&["aaa", "bbb", "ccc"], &["aaa", "zzz", "ccc"]);
    assert_eq!(patch.len(), 1);
    let delta = &patch.deltas()[0];
    assert_eq!(delta.kind(), DeltaType::Change);
    assert_eq!(delta.original(), &Chunk::new(1, vec!["bbb"]));
    assert_eq!(delta.revised(), &Chunk::new(1, vec!["zzz"]));
}

#[test]
fn test_empty_scenario() {
    let patch = diff::<String>(&[], &[]);
    assert!(patch.is_empty());
}

#[test]
fn test_identical_unified_diff() {
    let a = strings(&["abc"]);
    let text = generate_unified_diff("a", "b", &a, &diff(&a, &a), 0);
    assert_eq!(text, strings(&["--- a", "+++ b"]));
}

#[test]
fn test_rows_ignore_white_spaces() {
    let config = DiffRowConfig {
        ignore_white_spaces: true,
        ..DiffRowConfig::default()
    };
    let old: Vec<&str> = "anything \n \nother".split('\n').collect();
    let new: Vec<&str> = "anything\n\nother".split('\n').collect();
    let rows = DiffRowGenerator::new(config)
        .unwrap()
        .generate_diff_rows(&old, &new);
    assert!(rows.iter().all(|r| r.tag == Tag::Equal));
}

#[test]
fn test_parsed_patch_applies_to_text() {
    let diff_text = "--- a/greeting.txt\n\
                     +++ b/greeting.txt\n\
                     @@ -1,3 +1,3 @@\n\
                     \x20hello\n\
                     -world\n\
                     +there\n\
                     \x20bye\n";
    let patch = <Patch<String> as unified::FromPatch>::from_patch(diff_text).unwrap();
    let original = strings(&["hello", "world", "bye"]);
    assert_eq!(
        patch.apply_to(&original),
        Ok(strings(&["hello", "there", "bye"]))
    );
}

#[test]
fn test_patch_against_wrong_base() {
    let patch = diff(&strings(&["a", "b", "c"]), &strings(&["a", "c"]));
    let err = patch.apply_to(&strings(&["a", "x", "c"])).unwrap_err();
    assert_eq!(err.actual, strings(&["x"]));
    assert_eq!(err.delta.kind(), DeltaType::Delete);
}

#[test]
fn test_concurrent_diffs() {
    let handles: Vec<_> = (0..4)
        .map(|i| {
            std::thread::spawn(move || {
                let old: Vec<u32> = (0..200).collect();
                let new: Vec<u32> = (0..200).filter(|n| n % (i + 2) != 0).collect();
                let patch = diff(&old, &new);
                patch.apply_to(&old) == Ok(new)
            })
        })
        .collect();
    for handle in handles {
        assert!(handle.join().unwrap());
    }
}
