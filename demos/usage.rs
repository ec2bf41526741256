//! Walkthrough of the tracer in ordinary code.
//!
//! Control the output from the shell before running:
//!
//! ```sh
//! export TRACEGROUP=Foo          # or Bar, or Foo,Bar, or ALL
//! export TRACELEVEL=5            # raise to 10 for the detail lines
//! export TRACEONLY=TRUE          # only show lines at exactly TRACELEVEL
//! cargo run --example usage
//! ```

use scoped_tracer::{trace, TraceHandle};

struct Foo;

impl Foo {
    fn foo_function(&self) {
        // Entering message: group "Foo", level 5.
        TraceHandle::new(true, "Foo", 5, "Entering foo_function()");

        // ...do some Foo stuff. Perhaps there is an error condition,
        // indicated with a boolean flag.
        let some_error_flag = true;
        let some_error_message = "Too Close for Comfort!";
        trace(
            some_error_flag,
            "Foo",
            5,
            &format!("Encountered an error condition: {some_error_message}"),
        );

        // Higher level of detail: group is still "Foo" but level is now 10.
        let mut tt = TraceHandle::new(true, "Foo", 10, "Doing some detailed calculations");
        for i in 0..10 {
            tt.print(true, &format!("Iteration {i}"));
        }
        // `tt` drops here and writes its -exit- line (if it printed).
    }
}

struct Bar;

impl Bar {
    fn bar_function(&self) {
        TraceHandle::new(true, "Bar", 5, "Entering bar_function()");

        // ...more Bar stuff
    }
}

fn main() {
    let f = Foo;
    let b = Bar;

    f.foo_function();
    b.bar_function();

    // Sample stderr output with TRACEGROUP=Foo,Bar and TRACELEVEL=5:
    //
    //     Tracer: [1][Foo, 5] Entering foo_function()
    //     Tracer: [2][Foo, 5] Encountered an error condition: Too Close for Comfort!
    //     Tracer: [3][Bar, 5] Entering bar_function()
    //
    // With TRACELEVEL=10 the detail handle is armed as well:
    //
    //     Tracer: [1][Foo, 5] Entering foo_function()
    //     Tracer: [2][Foo, 5] Encountered an error condition: Too Close for Comfort!
    //     Tracer: [3][Foo, 10] Doing some detailed calculations
    //     Tracer: [3][Foo, 10] Iteration 0
    //     ...
    //     Tracer: [3][Foo, 10] Iteration 9
    //     Tracer: [3][Foo, 10] -exit-
    //     Tracer: [4][Bar, 5] Entering bar_function()
    //
    // Adding TRACEONLY=TRUE (still TRACELEVEL=10) keeps only the exact-level
    // lines:
    //
    //     Tracer: [1][Foo, 10] Doing some detailed calculations
    //     Tracer: [1][Foo, 10] Iteration 0
    //     ...
    //     Tracer: [1][Foo, 10] Iteration 9
    //     Tracer: [1][Foo, 10] -exit-
}
