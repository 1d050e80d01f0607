// SPDX-License-Identifier: AGPL-3.0-or-later
//! CLI command implementations

use alx_core::{
    options::{
        CreateDirectory, CreateFile, Delete, Exists, Free, GetStatus, ListStatus, Mount, OpenFile,
        Rename, SetAttribute, Unmount,
    },
    AlluxioPath, AlxError, AlxResult, Operation, PathOptions, PathRequest, Payload, ProxyConfig,
};
use console::style;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tabled::{Table, Tabled};

/// Arguments of the `request` command
pub struct RequestArgs {
    pub operation: Operation,
    pub path: String,
    pub set: Vec<String>,
    pub options_file: Option<PathBuf>,
    pub dst: Option<String>,
    pub src: Option<String>,
    pub body_only: bool,
}

#[derive(Tabled)]
struct OperationRow {
    #[tabled(rename = "Operation")]
    action: String,
    #[tabled(rename = "Options")]
    options: usize,
    #[tabled(rename = "Query")]
    query: String,
}

#[derive(Tabled)]
struct FieldRow {
    #[tabled(rename = "Option")]
    name: &'static str,
    #[tabled(rename = "Payload key")]
    key: &'static str,
    #[tabled(rename = "Kind")]
    kind: String,
}

/// Resolve the proxy endpoint from the config file and flag overrides
pub fn proxy_config(
    path: Option<&Path>,
    host: Option<String>,
    port: Option<u16>,
) -> AlxResult<ProxyConfig> {
    let mut config = match path {
        Some(path) => ProxyConfig::load(path)?,
        None => ProxyConfig::default(),
    };
    if let Some(host) = host {
        config.host = host;
    }
    if let Some(port) = port {
        config.port = port;
    }
    config.validate()?;
    Ok(config)
}

/// List supported operations
pub fn operations() -> AlxResult<()> {
    let rows: Vec<OperationRow> = Operation::ALL
        .into_iter()
        .map(|op| OperationRow {
            action: style(op.action()).cyan().to_string(),
            options: op.fields().len(),
            query: op.required_query().unwrap_or("-").to_string(),
        })
        .collect();

    println!("{}", Table::new(rows));
    Ok(())
}

/// Show the options an operation accepts
pub fn fields(operation: Operation) -> AlxResult<()> {
    let fields = operation.fields();
    if fields.is_empty() {
        println!("{} takes no options", style(operation).cyan());
        return Ok(());
    }

    let rows: Vec<FieldRow> = fields
        .iter()
        .map(|field| FieldRow {
            name: field.name,
            key: field.key,
            kind: field.kind.to_string(),
        })
        .collect();

    println!("{}", Table::new(rows));
    Ok(())
}

/// Build a request and print it
pub fn request(proxy: &ProxyConfig, args: &RequestArgs) -> AlxResult<()> {
    let config = collect_options(args)?;
    let path = AlluxioPath::parse_uri(&args.path)?;
    let request = build_request(
        args.operation,
        path,
        &config,
        args.dst.as_deref(),
        args.src.as_deref(),
    )?;

    let output = if args.body_only {
        Value::Object(request.body.clone())
    } else {
        request.describe(proxy)
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Options file values, then `--set` pairs on top
fn collect_options(args: &RequestArgs) -> AlxResult<Payload> {
    let mut config = match &args.options_file {
        Some(path) => read_options_file(path)?,
        None => Payload::new(),
    };
    for pair in &args.set {
        let (key, value) = parse_set(args.operation, pair)?;
        config.insert(key, value);
    }
    Ok(config)
}

/// Split `key=value`.
///
/// Text options keep the raw value; anything else is JSON when it parses
/// and a string otherwise.
fn parse_set(operation: Operation, pair: &str) -> AlxResult<(String, Value)> {
    let (key, raw) = pair
        .split_once('=')
        .ok_or_else(|| AlxError::Config(format!("expected KEY=VALUE, got {pair:?}")))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(AlxError::Config(format!("empty option name in {pair:?}")));
    }
    let text = operation
        .fields()
        .iter()
        .any(|field| field.name == key && field.text);
    let value = if text {
        Value::String(raw.to_string())
    } else {
        serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
    };
    Ok((key.to_string(), value))
}

fn read_options_file(path: &Path) -> AlxResult<Payload> {
    let contents = std::fs::read_to_string(path)?;
    let is_toml = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("toml"))
        .unwrap_or(false);

    tracing::debug!(path = %path.display(), toml = is_toml, "reading options file");
    if is_toml {
        Ok(toml::from_str(&contents)?)
    } else {
        Ok(serde_json::from_str(&contents)?)
    }
}

fn build_request(
    operation: Operation,
    path: AlluxioPath,
    config: &Payload,
    dst: Option<&str>,
    src: Option<&str>,
) -> AlxResult<PathRequest> {
    fn plain<O: PathOptions>(path: AlluxioPath, config: &Payload) -> AlxResult<PathRequest> {
        Ok(PathRequest::new(path, &O::from_config(config)?))
    }

    if dst.is_some() && operation != Operation::Rename {
        tracing::warn!(%operation, "--dst only applies to rename, ignoring");
    }
    if src.is_some() && operation != Operation::Mount {
        tracing::warn!(%operation, "--src only applies to mount, ignoring");
    }

    let request = match operation {
        Operation::CreateDirectory => plain::<CreateDirectory>(path, config)?,
        Operation::CreateFile => plain::<CreateFile>(path, config)?,
        Operation::Delete => plain::<Delete>(path, config)?,
        Operation::Exists => plain::<Exists>(path, config)?,
        Operation::Free => plain::<Free>(path, config)?,
        Operation::GetStatus => plain::<GetStatus>(path, config)?,
        Operation::ListStatus => plain::<ListStatus>(path, config)?,
        Operation::OpenFile => plain::<OpenFile>(path, config)?,
        Operation::SetAttribute => plain::<SetAttribute>(path, config)?,
        Operation::Unmount => plain::<Unmount>(path, config)?,
        Operation::Rename => {
            let options = Rename::from_config(config)?;
            match dst {
                Some(dst) => PathRequest::rename(path, &AlluxioPath::parse_uri(dst)?, &options),
                None => PathRequest::new(path, &options),
            }
        }
        Operation::Mount => {
            let options = Mount::from_config(config)?;
            match src {
                Some(src) => PathRequest::mount(path, src, &options),
                None => PathRequest::new(path, &options),
            }
        }
    };

    request.validate()?;
    Ok(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    fn config(value: Value) -> Payload {
        match value {
            Value::Object(map) => map,
            other => panic!("not an object: {other}"),
        }
    }

    fn root() -> AlluxioPath {
        AlluxioPath::new("/data").unwrap()
    }

    fn args(operation: Operation, set: &[&str], options_file: Option<PathBuf>) -> RequestArgs {
        RequestArgs {
            operation,
            path: "/data".into(),
            set: set.iter().map(|s| s.to_string()).collect(),
            options_file,
            dst: None,
            src: None,
            body_only: false,
        }
    }

    #[test]
    fn test_parse_set_json_and_string() {
        let op = Operation::CreateFile;
        assert_eq!(parse_set(op, "recursive=true").unwrap(), ("recursive".into(), json!(true)));
        assert_eq!(parse_set(op, "ttl=3600000").unwrap(), ("ttl".into(), json!(3_600_000)));
        assert_eq!(parse_set(op, "mode=0755").unwrap(), ("mode".into(), json!("0755")));
        assert_eq!(
            parse_set(Operation::Mount, r#"properties={"fs.key":"v"}"#).unwrap(),
            ("properties".into(), json!({"fs.key": "v"}))
        );
    }

    #[test]
    fn test_parse_set_text_options_stay_strings() {
        let op = Operation::SetAttribute;
        assert_eq!(parse_set(op, "group=1000").unwrap(), ("group".into(), json!("1000")));
        assert_eq!(parse_set(op, "owner=true").unwrap(), ("owner".into(), json!("true")));
        assert_eq!(parse_set(op, "owner=null").unwrap(), ("owner".into(), json!("null")));

        let request = build_request(
            op,
            root(),
            &collect_options(&args(op, &["group=1000", "pinned=true"], None)).unwrap(),
            None,
            None,
        )
        .unwrap();
        assert_eq!(Value::Object(request.body), json!({"group": "1000", "pinned": true}));
    }

    #[test]
    fn test_parse_set_rejects_malformed() {
        assert!(matches!(parse_set(Operation::Delete, "recursive"), Err(AlxError::Config(_))));
        assert!(matches!(parse_set(Operation::Delete, "=true"), Err(AlxError::Config(_))));
    }

    #[test]
    fn test_set_overrides_options_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"recursive": false, "ttl": 1000, "owner": "alice"}}"#).unwrap();

        let config = collect_options(&args(
            Operation::SetAttribute,
            &["ttl=5000", "owner=bob"],
            Some(file.path().to_path_buf()),
        ))
        .unwrap();

        assert_eq!(
            Value::Object(config),
            json!({"recursive": false, "ttl": 5000, "owner": "bob"})
        );
    }

    #[test]
    fn test_build_request_from_config() {
        let request = build_request(
            Operation::CreateFile,
            root(),
            &config(json!({"recursive": true, "ttl": 3_600_000})),
            None,
            None,
        )
        .unwrap();
        assert_eq!(Value::Object(request.body), json!({"recursive": true, "ttl": 3_600_000}));
    }

    #[test]
    fn test_build_request_unknown_option() {
        let err = build_request(
            Operation::Free,
            root(),
            &config(json!({"force": true})),
            None,
            None,
        )
        .unwrap_err();
        assert!(matches!(err, AlxError::UnknownOption { .. }));
    }

    #[test]
    fn test_build_rename_needs_dst() {
        let err = build_request(Operation::Rename, root(), &Payload::new(), None, None).unwrap_err();
        assert!(err.is_option_error());

        let request =
            build_request(Operation::Rename, root(), &Payload::new(), Some("/archive"), None).unwrap();
        assert_eq!(request.query_value("dst"), Some("/archive"));
    }

    #[test]
    fn test_build_mount_with_src() {
        let request = build_request(
            Operation::Mount,
            AlluxioPath::new("/mnt/s3").unwrap(),
            &config(json!({"shared": true})),
            None,
            Some("s3a://bucket"),
        )
        .unwrap();
        assert_eq!(request.query_value("src"), Some("s3a://bucket"));
        assert_eq!(Value::Object(request.body), json!({"shared": true}));
    }

    #[test]
    fn test_read_options_file_toml_and_json() {
        let mut toml_file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(toml_file, "recursive = true\nwrite_type = \"MUST_CACHE\"").unwrap();
        let options = read_options_file(toml_file.path()).unwrap();
        assert_eq!(options["write_type"], json!("MUST_CACHE"));

        let mut json_file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(json_file, r#"{{"pinned": false}}"#).unwrap();
        let options = read_options_file(json_file.path()).unwrap();
        assert_eq!(options["pinned"], json!(false));
    }

    #[test]
    fn test_proxy_config_overrides() {
        let config = proxy_config(None, Some("proxy".into()), Some(40000)).unwrap();
        assert_eq!(config.base_url(), "http://proxy:40000/api/v1");

        assert!(proxy_config(None, None, Some(0)).is_err());
    }
}
