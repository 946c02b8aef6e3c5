//! `rload parse <uri>` – show the parsed descriptor without fetching.

use anyhow::Result;
use rload_core::{parse, ResourceDescriptor};

fn describe(d: &ResourceDescriptor) -> String {
    let mut out = format!(
        "{:<10} {}\n{:<10} {:?}\n",
        "scheme",
        d.scheme(),
        "transport",
        d.transport_kind()
    );
    if let (Some(host), Some(port)) = (d.host(), d.port()) {
        out.push_str(&format!("{:<10} {}\n{:<10} {}\n", "host", host, "port", port));
    }
    let label = match d {
        ResourceDescriptor::Inline(_) => "payload",
        _ => "path",
    };
    out.push_str(&format!("{:<10} {}\n", label, d.path()));
    out
}

pub fn run_parse(uri: &str, json: bool) -> Result<()> {
    let descriptor = parse(uri)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&descriptor)?);
    } else {
        print!("{}", describe(&descriptor));
    }
    Ok(())
}
