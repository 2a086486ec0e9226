//! Minimal shader pairs for solid-color line and triangle batches.
//!
//! Both backends use the same semantics: every vertex is multiplied by the
//! camera uniform and the fragment stage emits one uniform color. The
//! desktop pair targets GL 3.3 core, the embedded pair GLSL ES 100.

pub const LINE_VERTEX_SHADER_330: &str = r#"
#version 330 core

layout (location = 0) in vec3 a_position;

uniform mat4 u_camera;

void main() {
    gl_Position = u_camera * vec4(a_position, 1.0);
}
"#;

pub const LINE_FRAGMENT_SHADER_330: &str = r#"
#version 330 core

uniform vec4 u_color;

out vec4 frag_color;

void main() {
    frag_color = u_color;
}
"#;

pub const LINE_VERTEX_SHADER_ES: &str = r#"
#version 100

attribute vec3 a_position;

uniform mat4 u_camera;

void main() {
    gl_Position = u_camera * vec4(a_position, 1.0);
}
"#;

pub const LINE_FRAGMENT_SHADER_ES: &str = r#"
#version 100
precision mediump float;

uniform vec4 u_color;

void main() {
    gl_FragColor = u_color;
}
"#;
