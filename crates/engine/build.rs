// crates/engine/build.rs
fn main() {
    let f = |n| std::env::var(format!("CARGO_FEATURE_{}", n)).is_ok();

    if f("FFI") && !f("JSON_STORE") {
        panic!("feature 'ffi' requires 'json_store'");
    }
}
