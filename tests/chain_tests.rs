// Call-graph behavior: eligibility through chains of sibling candidates,
// cross-scope reuse of the growing eligible set, and pipeline idempotence.

mod common;
use common::{assert_promotes, assert_unchanged, normalized};

#[test]
fn candidate_calling_static_floor() {
    assert_promotes(
        r#"
class A {
    private int a() {
        return b();
    }
    private static int b() {
        return 0;
    }
}
"#,
        r#"
class A {
    private static int a() {
        return b();
    }
    private static int b() {
        return 0;
    }
}
"#,
    );
}

#[test]
fn candidate_chain_promotes_together() {
    assert_promotes(
        r#"
class A {
    private int a() {
        return b();
    }
    private int b() {
        return c();
    }
    private int c() {
        return 0;
    }
}
"#,
        r#"
class A {
    private static int a() {
        return b();
    }
    private static int b() {
        return c();
    }
    private static int c() {
        return 0;
    }
}
"#,
    );
}

#[test]
fn chain_order_does_not_matter() {
    // The callee is declared after the caller; both still promote
    assert_promotes(
        r#"
class A {
    private int first() {
        return second();
    }
    private int second() {
        return 0;
    }
}
"#,
        r#"
class A {
    private static int first() {
        return second();
    }
    private static int second() {
        return 0;
    }
}
"#,
    );
}

#[test]
fn chain_into_instance_access_blocks_all() {
    assert_unchanged(
        r#"
class A {
    int x = 0;
    private int a() {
        return b();
    }
    private int b() {
        return x;
    }
}
"#,
    );
}

#[test]
fn final_candidates_chain() {
    assert_promotes(
        r#"
class A {
    final int a() {
        return b();
    }
    final int b() {
        return 0;
    }
}
"#,
        r#"
class A {
    final static int a() {
        return b();
    }
    final static int b() {
        return 0;
    }
}
"#,
    );
}

#[test]
fn cycle_with_side_exit_keeps_only_the_exit() {
    assert_promotes(
        r#"
class A {
    private int a() {
        return b() + c();
    }
    private int b() {
        return a();
    }
    private int c() {
        return 0;
    }
}
"#,
        r#"
class A {
    private int a() {
        return b() + c();
    }
    private int b() {
        return a();
    }
    private static int c() {
        return 0;
    }
}
"#,
    );
}

#[test]
fn call_to_overridable_sibling_blocks_chain() {
    assert_unchanged(
        r#"
class A {
    private int a() {
        return b();
    }
    int b() {
        return 0;
    }
}
"#,
    );
}

#[test]
fn nested_class_uses_enclosing_eligible_method() {
    assert_promotes(
        r#"
class A {
    private int util() {
        return 1;
    }
    class Inner {
        private int test() {
            return util();
        }
    }
}
"#,
        r#"
class A {
    private static int util() {
        return 1;
    }
    class Inner {
        private static int test() {
            return util();
        }
    }
}
"#,
    );
}

#[test]
fn subclass_uses_inherited_promoted_method() {
    assert_promotes(
        r#"
class B {
    final int helper() {
        return 0;
    }
}
class A extends B {
    private int test() {
        return helper();
    }
}
"#,
        r#"
class B {
    final static int helper() {
        return 0;
    }
}
class A extends B {
    private static int test() {
        return helper();
    }
}
"#,
    );
}

#[test]
fn explicit_this_call_records_no_edge() {
    // `this.b()` cannot appear in a static body, so `a` stays even though
    // `b` itself is promotable
    assert_promotes(
        r#"
class A {
    private int a() {
        return this.b();
    }
    private int b() {
        return 0;
    }
}
"#,
        r#"
class A {
    private int a() {
        return this.b();
    }
    private static int b() {
        return 0;
    }
}
"#,
    );
}

#[test]
fn pipeline_is_idempotent() {
    let source = r#"
class A {
    int used = 0;
    private int promoted() {
        return 0;
    }
    private int kept() {
        return used;
    }
}
"#;
    let once = jstatic::rewrite_source(source).unwrap();
    let twice = jstatic::rewrite_source(&once).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn idempotent_across_chains_and_nesting() {
    let source = r#"
interface I {}
class A {
    private int a() {
        return b();
    }
    private int b() {
        return 0;
    }
    I i = new I() {
        private int inner() {
            return 0;
        }
    };
}
"#;
    let once = jstatic::rewrite_source(source).unwrap();
    let twice = jstatic::rewrite_source(&once).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn already_static_methods_round_trip() {
    let source = r#"
class A {
    private static int done() {
        return 0;
    }
}
"#;
    let rewritten = jstatic::rewrite_source(source).unwrap();
    assert_eq!(rewritten, normalized(source));
}
