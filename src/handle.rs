//! Scoped trace handles.

use crate::context::TraceContext;

const EXIT_MESSAGE: &str = "-exit-";

/// A scoped trace site.
///
/// Construction evaluates the gating predicate exactly once: the caller's
/// condition must hold, the handle's group must match `TRACEGROUP`, and its
/// level must compare favorably to `TRACELEVEL`. An armed handle receives a
/// unique ascending serial, writes its entry line immediately, and can echo
/// further detail through [`print`](TraceHandle::print). When an armed handle
/// is dropped after at least one successful `print`, it writes a matching
/// `-exit-` line; a handle used only for its entry message closes silently.
///
/// A handle that fails the predicate keeps serial 0 and stays inert for its
/// whole life.
///
/// # Example
///
/// ```rust
/// use scoped_tracer::TraceHandle;
///
/// fn foo_function() {
///     // Entry message only: the temporary is dropped right away.
///     TraceHandle::new(true, "Foo", 5, "Entering foo_function()");
///
///     // Higher level of detail, printed with the same serial throughout.
///     let mut tt = TraceHandle::new(true, "Foo", 10, "Doing some detailed calculations");
///     for i in 0..10 {
///         tt.print(true, &format!("Iteration {i}"));
///     }
///     // Dropping `tt` writes the matching -exit- line.
/// }
/// ```
pub struct TraceHandle<'ctx> {
    ctx: &'ctx TraceContext,
    group: String,
    level: i32,
    // 0 means suppressed; a positive serial doubles as the print-enable flag.
    serial: u64,
    use_count: u32,
}

impl TraceHandle<'static> {
    /// Open a trace site against the process-wide context.
    ///
    /// The first call in the process reads the `TRACEGROUP`, `TRACELEVEL`
    /// and `TRACEONLY` environment variables; see
    /// [`TraceConfig`](crate::TraceConfig) for their meaning. `condition`
    /// lets call sites trace only when something interesting happened, such
    /// as an error flag.
    pub fn new(condition: bool, group: &str, level: i32, message: &str) -> Self {
        Self::with_context(TraceContext::global(), condition, group, level, message)
    }
}

impl<'ctx> TraceHandle<'ctx> {
    /// Open a trace site against an explicit context.
    pub fn with_context(
        ctx: &'ctx TraceContext,
        condition: bool,
        group: &str,
        level: i32,
        message: &str,
    ) -> Self {
        let armed = condition && ctx.config().allows(group, level);
        let serial = if armed {
            ctx.emit_entry(group, level, message)
        } else {
            0
        };
        Self {
            ctx,
            group: group.to_owned(),
            level,
            serial,
            use_count: 0,
        }
    }

    /// Write another line for this site, reusing the serial assigned at
    /// construction. Does nothing unless the handle is armed and `condition`
    /// holds.
    pub fn print(&mut self, condition: bool, message: &str) {
        if condition && self.serial > 0 {
            self.ctx.emit(self.serial, &self.group, self.level, message);
            self.use_count += 1;
        }
    }

    /// Whether this handle passed the gating predicate at construction.
    pub fn is_armed(&self) -> bool {
        self.serial > 0
    }

    /// The serial assigned at construction, or 0 when suppressed.
    pub fn serial(&self) -> u64 {
        self.serial
    }
}

impl Drop for TraceHandle<'_> {
    fn drop(&mut self) {
        // Entry-only handles close silently; only handles that accumulated
        // detail via print() get a matching exit line.
        if self.serial > 0 && self.use_count > 0 {
            self.ctx
                .emit(self.serial, &self.group, self.level, EXIT_MESSAGE);
        }
    }
}

/// One-shot trace line against the process-wide context.
///
/// Equivalent to constructing a [`TraceHandle`] and dropping it immediately:
/// at most the entry line is written, never an exit line.
pub fn trace(condition: bool, group: &str, level: i32, message: &str) {
    let _handle = TraceHandle::new(condition, group, level, message);
}
