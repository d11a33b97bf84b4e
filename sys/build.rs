//! Link directives for a prebuilt `libdie`.
//!
//! Building the library itself (CMake + Qt) is left to the user. Point
//! `DIE_LIB_DIR` at the directory holding `libdie.a` / `die.lib` and, when
//! Qt lives outside the default linker path, `QT6_LIB_PATH` at its `lib`
//! directory.

use std::env;

const THIRD_PARTY: [&str; 4] = ["bzip2", "lzma", "zlib", "capstone_x86"];
const QT_MODULES: [&str; 3] = ["Qt6Core", "Qt6Qml", "Qt6Network"];

fn main() {
    println!("cargo:rerun-if-env-changed=DIE_LIB_DIR");
    println!("cargo:rerun-if-env-changed=QT6_LIB_PATH");
    println!("cargo:rerun-if-changed=build.rs");

    if let Ok(dir) = env::var("DIE_LIB_DIR") {
        println!("cargo:rustc-link-search=native={dir}");
        println!("cargo:rustc-link-search=native={dir}/lib");
    }

    println!("cargo:rustc-link-lib=static=die++");
    println!("cargo:rustc-link-lib=static=die");
    for lib in THIRD_PARTY {
        println!("cargo:rustc-link-lib=static={lib}");
    }

    let target_os = env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();

    if let Ok(qt) = env::var("QT6_LIB_PATH") {
        if target_os == "macos" {
            println!("cargo:rustc-link-search=framework={qt}");
            println!("cargo:rustc-link-arg=-Wl,-rpath,{qt}");
        } else {
            println!("cargo:rustc-link-search=native={qt}");
        }
    }

    match target_os.as_str() {
        "macos" => {
            println!("cargo:rustc-link-lib=dylib=c++");
            for framework in ["QtCore", "QtQml", "QtNetwork"] {
                println!("cargo:rustc-link-lib=framework={framework}");
            }
        }
        "windows" => {
            println!("cargo:rustc-link-lib=dylib=Crypt32");
            println!("cargo:rustc-link-lib=dylib=Wintrust");
            for module in QT_MODULES {
                println!("cargo:rustc-link-lib=dylib={module}");
            }
        }
        _ => {
            println!("cargo:rustc-link-lib=dylib=stdc++");
            for module in QT_MODULES {
                println!("cargo:rustc-link-lib=dylib={module}");
            }
        }
    }
}
