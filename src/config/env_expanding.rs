use regex::{Captures, Regex};
use std::env;
use tracing::{error, info};

/// Expands `${VAR}` and `${VAR:default}` placeholders in the raw config text.
/// A placeholder with no matching variable and no default fails the whole parse.
pub fn expand_env_var(raw_config: &str) -> anyhow::Result<String> {
    // name = letters/digits/underscore, not starting with a digit;
    // everything after an optional `:` up to `}` is the default value
    let re = Regex::new(r"\$\{([a-zA-Z_][0-9a-zA-Z_]*)(?::([^}]*))?\}").unwrap();
    let mut err = Ok(());
    let result = re.replace_all(raw_config, |caps: &Captures| {
        let var = &caps[1];
        match env::var(var) {
            Ok(value) => {
                info!("Expanding ${var} from environment");
                value
            }
            Err(_) => match caps.get(2) {
                Some(default) if !default.as_str().is_empty() => {
                    info!("${var} not set, using default from config");
                    default.as_str().to_string()
                }
                _ => {
                    error!("${var} not set and no default given");
                    err = Err(anyhow::anyhow!("Variable ${var} not found"));
                    "".to_string()
                }
            },
        }
    });
    err?;

    Ok(result.to_string())
}
