use std::env;
use std::fs;
use std::path::Path;

// Solo estas claves llegan a `option_env!` en src/config.rs
const KEY_PREFIX: &str = "SHELL_";

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let env_file = Path::new(".env");
    if !env_file.exists() {
        return;
    }
    println!("cargo:rerun-if-changed=.env");

    let contents = match fs::read_to_string(env_file) {
        Ok(contents) => contents,
        Err(e) => {
            println!("cargo:warning=Could not read .env: {}", e);
            return;
        }
    };

    for line in contents.lines().map(str::trim) {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            println!("cargo:warning=Ignoring malformed .env line: {}", line);
            continue;
        };
        let key = key.trim();
        let value = value.trim().trim_matches('"');
        // Una variable ya exportada en el entorno tiene prioridad
        if key.starts_with(KEY_PREFIX) && env::var(key).is_err() {
            println!("cargo:rustc-env={}={}", key, value);
        }
    }
}
