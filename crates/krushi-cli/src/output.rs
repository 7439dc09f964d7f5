//! Output formatting for CLI responses.

use serde_json::Value;

use krushi_client::parse_response;
use krushi_protocol::ServerInfo;

/// Prints an action result, formatted for reading unless `raw` is set.
pub fn print_result(result: &Value, raw: bool) -> anyhow::Result<()> {
    println!("{}", render_result(result, raw)?);
    Ok(())
}

fn render_result(result: &Value, raw: bool) -> anyhow::Result<String> {
    if raw {
        Ok(serde_json::to_string_pretty(result)?)
    } else {
        Ok(parse_response(result))
    }
}

/// Prints the server name, version, and action listing.
pub fn print_server_info(info: &ServerInfo) {
    println!("{}", render_server_info(info));
}

fn render_server_info(info: &ServerInfo) -> String {
    let mut out = format!("{} v{}\n", info.name, info.version);
    out.push_str(&format!("\nFlows ({}):\n", info.flows.len()));
    for flow in &info.flows {
        out.push_str(&format!("  {flow}\n"));
    }
    out.push_str(&format!("\nTools ({}):\n", info.tools.len()));
    for tool in &info.tools {
        out.push_str(&format!("  {tool}\n"));
    }
    out.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use krushi_protocol::ActionList;
    use serde_json::json;

    #[test]
    fn raw_result_is_pretty_json() {
        let out = render_result(&json!({"response": "ok"}), true).expect("render");
        assert_eq!(out, "{\n  \"response\": \"ok\"\n}");
    }

    #[test]
    fn formatted_result_unwraps_response() {
        let out = render_result(&json!({"response": "ok"}), false).expect("render");
        assert_eq!(out, "ok");
    }

    #[test]
    fn server_info_lists_both_kinds() {
        let info = ServerInfo::new(
            "krushimitra-mcp",
            "0.1.0",
            ActionList {
                flows: vec!["askAnything".into()],
                tools: vec!["getCurrentWeather".into(), "supportedLanguages".into()],
            },
        );
        let out = render_server_info(&info);
        assert!(out.starts_with("krushimitra-mcp v0.1.0"));
        assert!(out.contains("Flows (1):\n  askAnything"));
        assert!(out.contains("Tools (2):\n  getCurrentWeather\n  supportedLanguages"));
    }
}
