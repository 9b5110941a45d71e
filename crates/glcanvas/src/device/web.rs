use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, HtmlCanvasElement, WebGlBuffer, WebGlProgram, WebGlRenderingContext as Gl,
    WebGlShader, WebGlUniformLocation,
};

use crate::paint::Color;

use super::{ContextOptions, GlContext, ShaderStage, Surface, SurfaceRegistry};

impl Surface for HtmlCanvasElement {
    type Context = Gl;

    fn size(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    fn acquire_context(&self, options: &ContextOptions) -> Option<Gl> {
        let attrs = context_attributes(options);

        match self.get_context_with_context_options("webgl", &attrs) {
            Ok(Some(ctx)) => ctx.dyn_into::<Gl>().ok(),
            Ok(None) => None,
            Err(e) => {
                log::debug!("getContext(\"webgl\") threw: {e:?}");
                None
            }
        }
    }
}

/// `WebGLContextAttributes` object for `getContext`.
fn context_attributes(options: &ContextOptions) -> js_sys::Object {
    let attrs = js_sys::Object::new();
    for (key, value) in options.attributes() {
        if let Err(e) = js_sys::Reflect::set(&attrs, &key.into(), &JsValue::from_bool(value)) {
            log::warn!("failed to set context attribute {key}: {e:?}");
        }
    }
    attrs
}

impl SurfaceRegistry for Document {
    type Surface = HtmlCanvasElement;

    fn surface_by_id(&self, id: &str) -> Option<HtmlCanvasElement> {
        self.get_element_by_id(id)?
            .dyn_into::<HtmlCanvasElement>()
            .ok()
    }
}

fn stage_enum(stage: ShaderStage) -> u32 {
    match stage {
        ShaderStage::Vertex => Gl::VERTEX_SHADER,
        ShaderStage::Fragment => Gl::FRAGMENT_SHADER,
    }
}

impl GlContext for Gl {
    type Buffer = WebGlBuffer;
    type Shader = WebGlShader;
    type Program = WebGlProgram;
    type UniformLocation = WebGlUniformLocation;

    fn create_buffer(&self) -> Option<WebGlBuffer> {
        Gl::create_buffer(self)
    }

    fn bind_array_buffer(&self, buffer: Option<&WebGlBuffer>) {
        self.bind_buffer(Gl::ARRAY_BUFFER, buffer);
    }

    fn array_buffer_data_static(&self, data: &[u8]) {
        self.buffer_data_with_u8_array(Gl::ARRAY_BUFFER, data, Gl::STATIC_DRAW);
    }

    fn create_shader(&self, stage: ShaderStage) -> Option<WebGlShader> {
        Gl::create_shader(self, stage_enum(stage))
    }

    fn shader_source(&self, shader: &WebGlShader, source: &str) {
        Gl::shader_source(self, shader, source);
    }

    fn compile_shader(&self, shader: &WebGlShader) {
        Gl::compile_shader(self, shader);
    }

    fn shader_compile_status(&self, shader: &WebGlShader) -> bool {
        self.get_shader_parameter(shader, Gl::COMPILE_STATUS)
            .as_bool()
            .unwrap_or(false)
    }

    fn shader_info_log(&self, shader: &WebGlShader) -> Option<String> {
        self.get_shader_info_log(shader)
    }

    fn create_program(&self) -> Option<WebGlProgram> {
        Gl::create_program(self)
    }

    fn attach_shader(&self, program: &WebGlProgram, shader: &WebGlShader) {
        Gl::attach_shader(self, program, shader);
    }

    fn link_program(&self, program: &WebGlProgram) {
        Gl::link_program(self, program);
    }

    fn program_link_status(&self, program: &WebGlProgram) -> bool {
        self.get_program_parameter(program, Gl::LINK_STATUS)
            .as_bool()
            .unwrap_or(false)
    }

    fn program_info_log(&self, program: &WebGlProgram) -> Option<String> {
        self.get_program_info_log(program)
    }

    fn use_program(&self, program: Option<&WebGlProgram>) {
        Gl::use_program(self, program);
    }

    fn uniform_location(&self, program: &WebGlProgram, name: &str) -> Option<WebGlUniformLocation> {
        self.get_uniform_location(program, name)
    }

    fn uniform_matrix4(&self, location: Option<&WebGlUniformLocation>, value: &[f32; 16]) {
        // WebGL 1 requires `transpose == false`.
        self.uniform_matrix4fv_with_f32_array(location, false, value);
    }

    fn attrib_location(&self, program: &WebGlProgram, name: &str) -> i32 {
        self.get_attrib_location(program, name)
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        Gl::enable_vertex_attrib_array(self, index);
    }

    fn vertex_attrib_pointer_f32(&self, index: u32, components: i32, stride: i32, offset: i32) {
        self.vertex_attrib_pointer_with_i32(index, components, Gl::FLOAT, false, stride, offset);
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        Gl::viewport(self, x, y, width, height);
    }

    fn clear_color(&self, color: Color) {
        Gl::clear_color(self, color.r, color.g, color.b, color.a);
    }

    fn clear_color_buffer(&self) {
        self.clear(Gl::COLOR_BUFFER_BIT);
    }

    fn draw_triangles(&self, first: i32, count: i32) {
        self.draw_arrays(Gl::TRIANGLES, first, count);
    }
}
