// Inputs the analysis must leave alone: overridable methods, constructors,
// every flavor of instance access, inheritance, serialization hooks, and
// recursion with no instance-independent floor.

mod common;
use common::assert_unchanged;

#[test]
fn public_methods_are_overridable() {
    assert_unchanged(
        r#"
class A {
    public void test() {}
}
"#,
    );
}

#[test]
fn package_visible_methods_are_overridable() {
    assert_unchanged(
        r#"
class A {
    void test() {}
}
"#,
    );
}

#[test]
fn protected_methods_are_overridable() {
    assert_unchanged(
        r#"
class A {
    protected void test() {}
}
"#,
    );
}

#[test]
fn constructors_are_never_promoted() {
    assert_unchanged(
        r#"
class A {
    public A() {}
}
"#,
    );
    assert_unchanged(
        r#"
class A {
    private A() {}
}
"#,
    );
}

#[test]
fn instance_field_read() {
    assert_unchanged(
        r#"
class A {
    int a = 0;
    private int test() {
        return a;
    }
}
"#,
    );
}

#[test]
fn final_method_with_instance_field_read() {
    assert_unchanged(
        r#"
class A {
    int a = 0;
    final int test() {
        return a;
    }
}
"#,
    );
}

#[test]
fn returning_this() {
    assert_unchanged(
        r#"
class A {
    private A test() {
        return this;
    }
}
"#,
    );
}

#[test]
fn super_method_call() {
    assert_unchanged(
        r#"
class A {
    private int test() {
        return super.hashCode();
    }
}
"#,
    );
}

#[test]
fn implicit_instance_method_call() {
    assert_unchanged(
        r#"
class A {
    void method() {}
    private void test() {
        method();
    }
}
"#,
    );
}

#[test]
fn explicit_this_field_access() {
    assert_unchanged(
        r#"
class A {
    int a = 0;
    private int test() {
        return this.a;
    }
}
"#,
    );
}

#[test]
fn explicit_this_method_call() {
    assert_unchanged(
        r#"
class A {
    void method() {}
    private void test() {
        this.method();
    }
}
"#,
    );
}

#[test]
fn instance_access_in_local_declaration() {
    assert_unchanged(
        r#"
class A {
    int a = 0;
    final int test() {
        int i = a;
        return i;
    }
}
"#,
    );
}

#[test]
fn instance_method_in_local_declaration() {
    assert_unchanged(
        r#"
class A {
    int method() {
        return 0;
    }
    private int test() {
        int i = method();
        return i;
    }
}
"#,
    );
}

#[test]
fn instance_access_in_expression() {
    assert_unchanged(
        r#"
class A {
    int a = 0;
    final int test() {
        return a + 42;
    }
}
"#,
    );
}

#[test]
fn instance_field_write() {
    assert_unchanged(
        r#"
class A {
    int a = 0;
    private void test() {
        a = 42;
    }
}
"#,
    );
}

#[test]
fn explicit_this_field_write() {
    assert_unchanged(
        r#"
class A {
    int a = 0;
    private void test() {
        this.a = 42;
    }
}
"#,
    );
}

#[test]
fn inner_class_instantiation_captures_enclosing_instance() {
    assert_unchanged(
        r#"
class A {
    class B {}
    private B test() {
        return new B();
    }
}
"#,
    );
}

#[test]
fn inherited_field_access() {
    assert_unchanged(
        r#"
class B {
    protected int b = 0;
}
class A extends B {
    private int test() {
        return b;
    }
}
"#,
    );
}

#[test]
fn inherited_method_call() {
    assert_unchanged(
        r#"
class B {
    protected void parent() {}
}
class A extends B {
    private void test() {
        parent();
    }
}
"#,
    );
}

#[test]
fn anonymous_class_method_reading_own_field() {
    assert_unchanged(
        r#"
interface I {}
class A {
    I i = new I() {
        int field = 0;
        private int test() {
            return field;
        }
    };
}
"#,
    );
}

#[test]
fn anonymous_class_method_reading_enclosing_field() {
    assert_unchanged(
        r#"
interface I {}
class A {
    int field = 0;
    I i = new I() {
        private int test() {
            return field;
        }
    };
}
"#,
    );
}

#[test]
fn local_class_field_initialized_from_enclosing_instance() {
    assert_unchanged(
        r#"
class A {
    int a = 0;
    private int method() {
        class C {
            int field = a;
        }
        C c = new C();
        return c.field;
    }
}
"#,
    );
}

#[test]
fn local_class_method_reading_enclosing_instance() {
    assert_unchanged(
        r#"
class A {
    int a = 0;
    private int method() {
        class C {
            int inner() {
                return a;
            }
        }
        C c = new C();
        return c.inner();
    }
}
"#,
    );
}

#[test]
fn serialization_hooks_stay_instance_dispatched() {
    assert_unchanged(
        r#"
class A implements java.io.Serializable {
    private void writeObject(java.io.ObjectOutputStream out) throws java.io.IOException {
    }

    private void readObject(java.io.ObjectInputStream in) throws java.io.IOException, java.lang.ClassNotFoundException {
    }

    private void readObjectNoData() throws java.io.ObjectStreamException {
    }
}
"#,
    );
}

#[test]
fn self_recursion_stays() {
    assert_unchanged(
        r#"
class A {
    private int test() {
        return test();
    }
}
"#,
    );
}

#[test]
fn mutual_recursion_stays() {
    assert_unchanged(
        r#"
class A {
    private int test1() {
        return test2();
    }
    private int test2() {
        return test1();
    }
}
"#,
    );
}

#[test]
fn unresolvable_reference_fails_closed() {
    assert_unchanged(
        r#"
class A {
    private int test() {
        return mystery;
    }
}
"#,
    );
}

#[test]
fn this_bound_method_reference() {
    assert_unchanged(
        r#"
class A {
    void run() {}
    private Runnable test() {
        return this::run;
    }
}
"#,
    );
}
