use std::{env, path::PathBuf};

fn main() {
  println!("cargo:rustc-link-lib=uring");
  println!("cargo:rerun-if-changed=wrapper.h");

  let bindings = bindgen::Builder::default()
    .header("wrapper.h")
    .parse_callbacks(Box::new(bindgen::CargoCallbacks::new()))
    .allowlist_function("io_uring_.*")
    .allowlist_type("io_uring.*")
    .allowlist_var("IORING_.*")
    .allowlist_var("IOSQE_.*")
    .generate()
    .expect("failed to generate liburing bindings");

  let out_path = PathBuf::from(env::var("OUT_DIR").unwrap());
  bindings
    .write_to_file(out_path.join("bindings.rs"))
    .expect("failed to write liburing bindings");
}
