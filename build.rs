fn main() {
    println!("cargo:rerun-if-env-changed=LIBSODIUM_PATH");
    #[cfg(feature = "libsodium")]
    sodium::generate_bindings();
}

#[cfg(feature = "libsodium")]
mod sodium {
    use std::path::{Path, PathBuf};

    pub fn generate_bindings() {
        let target_arch = std::env::var("CARGO_CFG_TARGET_ARCH").unwrap_or_default();
        let target_os = std::env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();
        // ignoring build for WASM arch or Windows OS: the pure backend is used there
        if target_arch == "wasm32" || target_os == "windows" {
            return;
        }

        let header = match std::env::var("LIBSODIUM_PATH") {
            Ok(path) => path + "/sodium.h",
            Err(_) => match target_os.as_str() {
                "macos" => "/usr/local/include/sodium.h",
                _ => "/usr/include/sodium.h",
            }
            .to_string(),
        };
        assert!(
            Path::new(&header).exists(),
            "feature `libsodium` is enabled but {header} was not found, set LIBSODIUM_PATH"
        );
        println!("cargo:rerun-if-changed={header}");

        // only the IETF stream cipher and the library initialization are needed
        let bindings = bindgen::Builder::default()
            .header(header)
            .allowlist_function("sodium_init")
            .allowlist_function("crypto_stream_chacha20_ietf_xor_ic")
            .allowlist_var("crypto_stream_chacha20_ietf_KEYBYTES")
            .allowlist_var("crypto_stream_chacha20_ietf_NONCEBYTES")
            .generate()
            .expect("Unable to generate bindings for lib sodium");

        let out_path = PathBuf::from(std::env::var("OUT_DIR").expect("OUT_DIR is set by cargo"));
        bindings
            .write_to_file(out_path.join("sodium_bindings.rs"))
            .expect("Couldn't write bindings for sodium!");

        println!("cargo:rustc-link-lib=dylib=sodium");
    }
}
