use std::cell::Cell;
use std::rc::Rc;

use treefind::{
    from_fn, try_from_fn, Entry, FindError, HasExtension, InPath, IsHidden, MatchesGlob,
    Specification,
};

// ---------------------------------------------------------------------------
// Test helpers
// ---------------------------------------------------------------------------

/// Always answers the same thing.
#[derive(Clone, Copy)]
struct Const(bool);

impl Specification for Const {
    fn is_satisfied_by(&self, _entry: &Entry) -> Result<bool, FindError> {
        Ok(self.0)
    }
}

/// Fails whenever it is evaluated.
struct Fault;

impl Specification for Fault {
    fn is_satisfied_by(&self, entry: &Entry) -> Result<bool, FindError> {
        Err(FindError::predicate(&entry.path, "evaluated"))
    }
}

/// Counts its evaluations.
struct Counting {
    answer: bool,
    calls:  Rc<Cell<usize>>,
}

impl Specification for Counting {
    fn is_satisfied_by(&self, _entry: &Entry) -> Result<bool, FindError> {
        self.calls.set(self.calls.get() + 1);
        Ok(self.answer)
    }
}

fn sample() -> Entry {
    Entry::file("dir/sample.txt")
}

// ---------------------------------------------------------------------------
// Combinators
// ---------------------------------------------------------------------------

#[test]
fn and_or_not_truth_tables() {
    let e = sample();
    for p in [false, true] {
        for q in [false, true] {
            assert_eq!(Const(p).and(Const(q)).is_satisfied_by(&e).unwrap(), p && q);
            assert_eq!(Const(p).or(Const(q)).is_satisfied_by(&e).unwrap(), p || q);
        }
        assert_eq!(Const(p).not().is_satisfied_by(&e).unwrap(), !p);
    }
}

#[test]
fn and_skips_right_when_left_unsatisfied() {
    let e = sample();
    assert!(!Const(false).and(Fault).is_satisfied_by(&e).unwrap());
}

#[test]
fn or_skips_right_when_left_satisfied() {
    let e = sample();
    assert!(Const(true).or(Fault).is_satisfied_by(&e).unwrap());
}

#[test]
fn left_operand_is_evaluated_first() {
    let e = sample();
    assert!(Fault.and(Const(false)).is_satisfied_by(&e).is_err());
    assert!(Fault.or(Const(true)).is_satisfied_by(&e).is_err());
}

#[test]
fn right_operand_evaluated_only_when_needed() {
    let e = sample();
    let calls = Rc::new(Cell::new(0));
    let right = || Counting { answer: true, calls: Rc::clone(&calls) };

    Const(false).and(right()).is_satisfied_by(&e).unwrap();
    Const(true).or(right()).is_satisfied_by(&e).unwrap();
    assert_eq!(calls.get(), 0);

    Const(true).and(right()).is_satisfied_by(&e).unwrap();
    Const(false).or(right()).is_satisfied_by(&e).unwrap();
    assert_eq!(calls.get(), 2);
}

#[test]
fn combinators_expose_their_operands() {
    let and = Const(true).and(Const(false));
    assert!(and.left().0);
    assert!(!and.right().0);

    let or = Const(false).or(Const(true));
    assert!(!or.left().0);
    assert!(or.right().0);

    let not = IsHidden.not();
    assert_eq!(*not.inner(), IsHidden);
    assert_eq!(not.into_inner(), IsHidden);
}

#[test]
fn not_propagates_inner_error() {
    let e = sample();
    let err = Fault.not().is_satisfied_by(&e).unwrap_err();
    assert!(matches!(err, FindError::Predicate { .. }));
    assert_eq!(err.path(), Some("dir/sample.txt"));
}

#[test]
fn de_morgan_holds() {
    let e = sample();
    for p in [false, true] {
        for q in [false, true] {
            let lhs = Const(p).and(Const(q)).not().is_satisfied_by(&e).unwrap();
            let rhs = Const(p).not().or(Const(q).not()).is_satisfied_by(&e).unwrap();
            assert_eq!(lhs, rhs, "p={p} q={q}");

            let lhs = Const(p).or(Const(q)).not().is_satisfied_by(&e).unwrap();
            let rhs = Const(p).not().and(Const(q).not()).is_satisfied_by(&e).unwrap();
            assert_eq!(lhs, rhs, "p={p} q={q}");
        }
    }
}

#[test]
fn double_negation_is_identity() {
    let specs: Vec<Box<dyn Specification>> = vec![
        Box::new(IsHidden),
        Box::new(HasExtension::new(["txt"])),
        Box::new(Const(false)),
    ];
    let entries = [
        Entry::file("a.txt"),
        Entry::file(".b"),
        Entry::file("c/d.rs"),
    ];
    for spec in &specs {
        for e in &entries {
            assert_eq!(
                spec.not().not().is_satisfied_by(e).unwrap(),
                spec.is_satisfied_by(e).unwrap(),
            );
        }
    }
}

#[test]
fn composites_nest_and_mix_boxed_operands() {
    let boxed: Box<dyn Specification> = Box::new(HasExtension::new(["md"]));
    let spec = HasExtension::new(["rs"])
        .and(IsHidden.not())
        .or(boxed.and(InPath::new("docs").unwrap()));

    assert!(spec.is_satisfied_by(&Entry::file("src/lib.rs")).unwrap());
    assert!(!spec.is_satisfied_by(&Entry::file("src/.lib.rs")).unwrap());
    assert!(spec.is_satisfied_by(&Entry::file("docs/guide/intro.md")).unwrap());
    assert!(!spec.is_satisfied_by(&Entry::file("README.md")).unwrap());
}

#[test]
fn borrowed_specification_can_be_reused() {
    let hidden = IsHidden;
    let a = (&hidden).and(HasExtension::new(["txt"]));
    let b = (&hidden).not();
    let e = Entry::file(".notes.txt");
    assert!(a.is_satisfied_by(&e).unwrap());
    assert!(!b.is_satisfied_by(&e).unwrap());
    assert!(hidden.is_satisfied_by(&e).unwrap());
}

#[test]
fn evaluation_is_repeatable() {
    let spec = IsHidden.or(HasExtension::new(["log"])).not();
    let e = Entry::file("var/app.log");
    let first = spec.is_satisfied_by(&e).unwrap();
    for _ in 0..3 {
        assert_eq!(spec.is_satisfied_by(&e).unwrap(), first);
    }
}

// ---------------------------------------------------------------------------
// Built-in specifications
// ---------------------------------------------------------------------------

#[test]
fn is_hidden_checks_basename_only() {
    assert!(IsHidden.is_satisfied_by(&Entry::file(".hiddendir/.test.txt")).unwrap());
    assert!(!IsHidden.is_satisfied_by(&Entry::file(".hiddendir/test.txt")).unwrap());
    assert!(!IsHidden.is_satisfied_by(&Entry::file("test.txt")).unwrap());
}

#[test]
fn is_hidden_prefers_backend_basename() {
    let e = Entry::file("x/visible").with("basename", ".override");
    assert!(IsHidden.is_satisfied_by(&e).unwrap());
}

#[test]
fn has_extension_matches_any_listed_extension() {
    let spec = HasExtension::new([".txt", "md"]);
    assert!(spec.is_satisfied_by(&Entry::file("a/b.txt")).unwrap());
    assert!(spec.is_satisfied_by(&Entry::file("c.md")).unwrap());
    assert!(!spec.is_satisfied_by(&Entry::file("c.rs")).unwrap());
    assert!(!spec.is_satisfied_by(&Entry::file("Makefile")).unwrap());
    assert!(!spec.is_satisfied_by(&Entry::file(".txt")).unwrap());
}

#[test]
fn in_path_matches_descendants_of_glob_directory() {
    let spec = InPath::new("src/*").unwrap();
    assert!(spec.is_satisfied_by(&Entry::file("src/a/b.rs")).unwrap());
    assert!(spec.is_satisfied_by(&Entry::file("src/a/deep/c.rs")).unwrap());
    assert!(!spec.is_satisfied_by(&Entry::file("src/e.rs")).unwrap());
    assert!(!spec.is_satisfied_by(&Entry::file("lib/a/b.rs")).unwrap());

    for root in ["", ".", "./"] {
        let spec = InPath::new(root).unwrap();
        assert_eq!(spec.pattern(), root);
        assert!(spec.is_satisfied_by(&Entry::file("a.txt")).unwrap());
        assert!(spec.is_satisfied_by(&Entry::file("d/a.txt")).unwrap());
    }

    let spec = InPath::new("./src").unwrap();
    assert!(spec.is_satisfied_by(&Entry::file("src/a.rs")).unwrap());
    assert!(!spec.is_satisfied_by(&Entry::file("lib/a.rs")).unwrap());
}

#[test]
fn matches_glob_uses_whole_path() {
    let spec = MatchesGlob::new("**/*.rs").unwrap();
    assert!(spec.is_satisfied_by(&Entry::file("src/lib.rs")).unwrap());
    assert!(!spec.is_satisfied_by(&Entry::file("src/lib.rs.bak")).unwrap());
}

#[test]
fn invalid_glob_is_rejected_at_construction() {
    let err = MatchesGlob::new("src/[").unwrap_err();
    assert!(matches!(err, FindError::InvalidPattern { .. }));
    assert!(InPath::new("a/{b").is_err());
}

#[test]
fn closures_become_specifications() {
    let short = from_fn(|e: &Entry| e.path.len() <= 5);
    assert!(short.is_satisfied_by(&Entry::file("a.rs")).unwrap());
    assert!(!short.is_satisfied_by(&Entry::file("abcdef.rs")).unwrap());

    let needs_size = try_from_fn(|e: &Entry| {
        e.get("size")
            .map(|s| s != "0")
            .ok_or_else(|| FindError::predicate(&e.path, "missing size"))
    });
    assert!(needs_size.is_satisfied_by(&Entry::file("a").with("size", "3")).unwrap());
    assert!(needs_size.is_satisfied_by(&Entry::file("a")).is_err());
}
