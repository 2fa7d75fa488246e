//! Generates the `auth.Auth` tonic service from a Rust-side definition.
//!
//! Messages are declared by hand in `src/adapters/grpc/proto.rs`, so the
//! build needs no `protoc`.

fn main() {
    let method = |name: &str, route: &str, input: &str, output: &str| {
        tonic_build::manual::Method::builder()
            .name(name)
            .route_name(route)
            .input_type(format!("crate::adapters::grpc::proto::{input}"))
            .output_type(format!("crate::adapters::grpc::proto::{output}"))
            .codec_path("tonic::codec::ProstCodec")
            .build()
    };

    let service = tonic_build::manual::Service::builder()
        .name("Auth")
        .package("auth")
        .method(method("login", "Login", "LoginRequest", "LoginResponse"))
        .method(method(
            "register",
            "Register",
            "RegisterRequest",
            "RegisterResponse",
        ))
        .method(method(
            "is_admin",
            "IsAdmin",
            "IsAdminRequest",
            "IsAdminResponse",
        ))
        .build();

    tonic_build::manual::Builder::new().compile(&[service]);
    println!("cargo:rerun-if-changed=build.rs");
}
