//! In-crate test doubles: a recording context, fake surfaces, a scheduler
//! whose callbacks fire only when told to, and a log capture.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::rc::Rc;
use std::sync::Once;

use anyhow::{bail, Result};
use log::{Level, LevelFilter, Log, Metadata, Record};

use crate::device::{ContextOptions, GlContext, ShaderStage, Surface, SurfaceRegistry};
use crate::paint::Color;
use crate::runtime::{FrameCallback, FrameScheduler};

/// Every state-changing call issued against a [`RecordingGl`].
///
/// Queries (status, info logs, locations) are not recorded.
#[derive(Debug, Clone, PartialEq)]
pub enum GlCall {
    CreateBuffer(u32),
    BindArrayBuffer(Option<u32>),
    BufferDataStatic(Vec<f32>),
    CreateShader(ShaderStage, u32),
    ShaderSource(u32, String),
    CompileShader(u32),
    CreateProgram(u32),
    AttachShader { program: u32, shader: u32 },
    LinkProgram(u32),
    UseProgram(Option<u32>),
    UniformMatrix4 { location: Option<u32>, value: [f32; 16] },
    EnableVertexAttribArray(u32),
    VertexAttribPointer { index: u32, components: i32, stride: i32, offset: i32 },
    Viewport(i32, i32, i32, i32),
    ClearColor(Color),
    ClearColorBuffer,
    DrawTriangles { first: i32, count: i32 },
}

#[derive(Debug)]
struct ShaderObject {
    stage: ShaderStage,
    source: String,
    compiled: bool,
}

#[derive(Debug, Default)]
struct GlState {
    next_id: u32,
    calls: Vec<GlCall>,

    shaders: HashMap<u32, ShaderObject>,
    attached: HashMap<u32, Vec<u32>>,
    linked: HashMap<u32, bool>,

    uniform_names: HashMap<u32, String>,
    uniforms: HashMap<String, [f32; 16]>,
    attributes: Vec<String>,

    compile_failures: HashMap<ShaderStage, String>,
    link_failure: Option<String>,
    null_shaders: HashSet<ShaderStage>,
    null_buffer: bool,
    null_program: bool,
}

impl GlState {
    fn id(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }

    fn program_mentions(&self, program: u32, name: &str) -> bool {
        self.attached
            .get(&program)
            .into_iter()
            .flatten()
            .filter_map(|s| self.shaders.get(s))
            .any(|s| s.source.contains(name))
    }
}

/// Context that records calls instead of talking to a GPU.
///
/// Clones share the same log, so a surface can hand out a clone while the
/// test keeps inspecting the original.
#[derive(Debug, Clone, Default)]
pub struct RecordingGl {
    state: Rc<RefCell<GlState>>,
}

impl RecordingGl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<GlCall> {
        self.state.borrow().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state.borrow_mut().calls.clear();
    }

    /// `(first, count)` of every draw call so far.
    pub fn draws(&self) -> Vec<(i32, i32)> {
        self.state
            .borrow()
            .calls
            .iter()
            .filter_map(|c| match c {
                GlCall::DrawTriangles { first, count } => Some((*first, *count)),
                _ => None,
            })
            .collect()
    }

    pub fn attached_shaders(&self, program: u32) -> Vec<u32> {
        self.state
            .borrow()
            .attached
            .get(&program)
            .cloned()
            .unwrap_or_default()
    }

    pub fn shaders_created(&self) -> usize {
        self.state.borrow().shaders.len()
    }

    /// Last matrix uploaded to the uniform called `name`.
    pub fn uniform_value(&self, name: &str) -> Option<[f32; 16]> {
        self.state.borrow().uniforms.get(name).copied()
    }

    /// Index handed out for attribute `name`, or `-1` if never looked up.
    pub fn attribute_index(&self, name: &str) -> i32 {
        self.state
            .borrow()
            .attributes
            .iter()
            .position(|a| a == name)
            .map_or(-1, |i| i as i32)
    }

    pub fn fail_compile(&self, stage: ShaderStage, log: &str) {
        self.state
            .borrow_mut()
            .compile_failures
            .insert(stage, log.to_string());
    }

    pub fn fail_link(&self, log: &str) {
        self.state.borrow_mut().link_failure = Some(log.to_string());
    }

    pub fn fail_shader_allocation(&self, stage: ShaderStage) {
        self.state.borrow_mut().null_shaders.insert(stage);
    }

    pub fn fail_buffer_allocation(&self) {
        self.state.borrow_mut().null_buffer = true;
    }

    pub fn fail_program_allocation(&self) {
        self.state.borrow_mut().null_program = true;
    }

    fn record(&self, call: GlCall) {
        self.state.borrow_mut().calls.push(call);
    }
}

impl GlContext for RecordingGl {
    type Buffer = u32;
    type Shader = u32;
    type Program = u32;
    type UniformLocation = u32;

    fn create_buffer(&self) -> Option<u32> {
        let mut st = self.state.borrow_mut();
        if st.null_buffer {
            return None;
        }
        let id = st.id();
        st.calls.push(GlCall::CreateBuffer(id));
        Some(id)
    }

    fn bind_array_buffer(&self, buffer: Option<&u32>) {
        self.record(GlCall::BindArrayBuffer(buffer.copied()));
    }

    fn array_buffer_data_static(&self, data: &[u8]) {
        let floats = data
            .chunks_exact(4)
            .map(|b| f32::from_ne_bytes([b[0], b[1], b[2], b[3]]))
            .collect();
        self.record(GlCall::BufferDataStatic(floats));
    }

    fn create_shader(&self, stage: ShaderStage) -> Option<u32> {
        let mut st = self.state.borrow_mut();
        if st.null_shaders.contains(&stage) {
            return None;
        }
        let id = st.id();
        st.shaders.insert(
            id,
            ShaderObject {
                stage,
                source: String::new(),
                compiled: false,
            },
        );
        st.calls.push(GlCall::CreateShader(stage, id));
        Some(id)
    }

    fn shader_source(&self, shader: &u32, source: &str) {
        let mut st = self.state.borrow_mut();
        if let Some(s) = st.shaders.get_mut(shader) {
            s.source = source.to_string();
        }
        st.calls.push(GlCall::ShaderSource(*shader, source.to_string()));
    }

    fn compile_shader(&self, shader: &u32) {
        let mut st = self.state.borrow_mut();
        let failures = st.compile_failures.clone();
        if let Some(s) = st.shaders.get_mut(shader) {
            s.compiled = !failures.contains_key(&s.stage);
        }
        st.calls.push(GlCall::CompileShader(*shader));
    }

    fn shader_compile_status(&self, shader: &u32) -> bool {
        self.state
            .borrow()
            .shaders
            .get(shader)
            .is_some_and(|s| s.compiled)
    }

    fn shader_info_log(&self, shader: &u32) -> Option<String> {
        let st = self.state.borrow();
        let s = st.shaders.get(shader)?;
        if s.compiled {
            Some(String::new())
        } else {
            st.compile_failures.get(&s.stage).cloned()
        }
    }

    fn create_program(&self) -> Option<u32> {
        let mut st = self.state.borrow_mut();
        if st.null_program {
            return None;
        }
        let id = st.id();
        st.attached.insert(id, Vec::new());
        st.calls.push(GlCall::CreateProgram(id));
        Some(id)
    }

    fn attach_shader(&self, program: &u32, shader: &u32) {
        let mut st = self.state.borrow_mut();
        st.attached.entry(*program).or_default().push(*shader);
        st.calls.push(GlCall::AttachShader {
            program: *program,
            shader: *shader,
        });
    }

    fn link_program(&self, program: &u32) {
        let mut st = self.state.borrow_mut();
        let stages_ok = st
            .attached
            .get(program)
            .into_iter()
            .flatten()
            .all(|s| st.shaders.get(s).is_some_and(|s| s.compiled));
        let ok = stages_ok && st.link_failure.is_none();
        st.linked.insert(*program, ok);
        st.calls.push(GlCall::LinkProgram(*program));
    }

    fn program_link_status(&self, program: &u32) -> bool {
        self.state
            .borrow()
            .linked
            .get(program)
            .copied()
            .unwrap_or(false)
    }

    fn program_info_log(&self, program: &u32) -> Option<String> {
        let st = self.state.borrow();
        if st.linked.get(program).copied().unwrap_or(false) {
            return Some(String::new());
        }
        Some(
            st.link_failure
                .clone()
                .unwrap_or_else(|| "one or more attached shaders not compiled".to_string()),
        )
    }

    fn use_program(&self, program: Option<&u32>) {
        self.record(GlCall::UseProgram(program.copied()));
    }

    fn uniform_location(&self, program: &u32, name: &str) -> Option<u32> {
        let mut st = self.state.borrow_mut();
        if !st.program_mentions(*program, name) {
            return None;
        }
        let id = st.id();
        st.uniform_names.insert(id, name.to_string());
        Some(id)
    }

    fn uniform_matrix4(&self, location: Option<&u32>, value: &[f32; 16]) {
        let mut st = self.state.borrow_mut();
        if let Some(name) = location.and_then(|l| st.uniform_names.get(l)).cloned() {
            st.uniforms.insert(name, *value);
        }
        st.calls.push(GlCall::UniformMatrix4 {
            location: location.copied(),
            value: *value,
        });
    }

    fn attrib_location(&self, program: &u32, name: &str) -> i32 {
        let mut st = self.state.borrow_mut();
        if !st.program_mentions(*program, name) {
            return -1;
        }
        let index = match st.attributes.iter().position(|a| a == name) {
            Some(i) => i,
            None => {
                st.attributes.push(name.to_string());
                st.attributes.len() - 1
            }
        };
        index as i32
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        self.record(GlCall::EnableVertexAttribArray(index));
    }

    fn vertex_attrib_pointer_f32(&self, index: u32, components: i32, stride: i32, offset: i32) {
        self.record(GlCall::VertexAttribPointer {
            index,
            components,
            stride,
            offset,
        });
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        self.record(GlCall::Viewport(x, y, width, height));
    }

    fn clear_color(&self, color: Color) {
        self.record(GlCall::ClearColor(color));
    }

    fn clear_color_buffer(&self) {
        self.record(GlCall::ClearColorBuffer);
    }

    fn draw_triangles(&self, first: i32, count: i32) {
        self.record(GlCall::DrawTriangles { first, count });
    }
}

/// Surface with a fixed size that hands out clones of one [`RecordingGl`].
#[derive(Debug, Clone)]
pub struct FakeSurface {
    width: u32,
    height: u32,
    gl: RecordingGl,
    available: bool,
    last_options: Rc<Cell<Option<ContextOptions>>>,
}

impl FakeSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            gl: RecordingGl::new(),
            available: true,
            last_options: Rc::default(),
        }
    }

    /// A surface whose context acquisition always fails.
    pub fn unavailable(width: u32, height: u32) -> Self {
        Self {
            available: false,
            ..Self::new(width, height)
        }
    }

    pub fn gl(&self) -> &RecordingGl {
        &self.gl
    }

    pub fn last_options(&self) -> Option<ContextOptions> {
        self.last_options.get()
    }
}

impl Surface for FakeSurface {
    type Context = RecordingGl;

    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn acquire_context(&self, options: &ContextOptions) -> Option<RecordingGl> {
        self.last_options.set(Some(*options));
        self.available.then(|| self.gl.clone())
    }
}

#[derive(Default)]
pub struct FakeRegistry {
    surfaces: HashMap<String, FakeSurface>,
    lookups: Cell<usize>,
}

impl FakeRegistry {
    pub fn insert(&mut self, id: &str, surface: FakeSurface) {
        self.surfaces.insert(id.to_string(), surface);
    }

    pub fn lookups(&self) -> usize {
        self.lookups.get()
    }
}

impl SurfaceRegistry for FakeRegistry {
    type Surface = FakeSurface;

    fn surface_by_id(&self, id: &str) -> Option<FakeSurface> {
        self.lookups.set(self.lookups.get() + 1);
        self.surfaces.get(id).cloned()
    }
}

/// Scheduler that queues callbacks until [`ManualScheduler::fire`].
#[derive(Default)]
pub struct ManualScheduler {
    pending: RefCell<Vec<FrameCallback>>,
    requests: Cell<usize>,
    failing: Cell<bool>,
}

impl ManualScheduler {
    /// Runs every queued callback once with `timestamp`.
    ///
    /// Callbacks registered while firing wait for the next call.
    pub fn fire(&self, timestamp: f64) {
        let due = std::mem::take(&mut *self.pending.borrow_mut());
        for cb in due {
            cb(timestamp);
        }
    }

    pub fn pending(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Successful registrations so far.
    pub fn requests(&self) -> usize {
        self.requests.get()
    }

    pub fn fail_requests(&self, fail: bool) {
        self.failing.set(fail);
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&self, callback: FrameCallback) -> Result<()> {
        if self.failing.get() {
            bail!("scheduler refused the callback");
        }
        self.requests.set(self.requests.get() + 1);
        self.pending.borrow_mut().push(callback);
        Ok(())
    }
}

// ── log capture ───────────────────────────────────────────────────────────

thread_local! {
    static CAPTURED: RefCell<Option<Vec<(Level, String)>>> = const { RefCell::new(None) };
}

/// Process-wide logger that keeps records only for threads inside
/// [`capture_logs`]. Tests run on separate threads, so captures don't mix.
struct CaptureLogger;

impl Log for CaptureLogger {
    fn enabled(&self, _: &Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &Record<'_>) {
        let line = record.args().to_string();
        CAPTURED.with(|c| {
            if let Some(buf) = c.borrow_mut().as_mut() {
                buf.push((record.level(), line));
            }
        });
    }

    fn flush(&self) {}
}

static CAPTURE_LOGGER: CaptureLogger = CaptureLogger;
static CAPTURE_INSTALL: Once = Once::new();

/// Installs the capture logger as the global `log` backend.
///
/// Must win the race against any other logger in the test binary, so tests
/// that initialize logging call this first.
pub fn install_log_capture() {
    CAPTURE_INSTALL.call_once(|| {
        if log::set_logger(&CAPTURE_LOGGER).is_ok() {
            log::set_max_level(LevelFilter::Trace);
        }
    });
}

/// Runs `f` and returns what it logged on this thread.
pub fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, Vec<(Level, String)>) {
    install_log_capture();
    CAPTURED.with(|c| *c.borrow_mut() = Some(Vec::new()));
    let out = f();
    let logs = CAPTURED.with(|c| c.borrow_mut().take()).unwrap_or_default();
    (out, logs)
}

/// Error-level lines that mention `needle`.
pub fn errors_mentioning(logs: &[(Level, String)], needle: &str) -> usize {
    logs.iter()
        .filter(|(level, line)| *level == Level::Error && line.contains(needle))
        .count()
}
