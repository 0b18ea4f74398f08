//! Command-line interface for gml-conformance

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};

#[cfg(feature = "cli")]
use std::fs;
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
use gml_conformance::geometry::{find_geometry_elements, CrsRegistry, GeometryChecker, GeometryReader};
#[cfg(feature = "cli")]
use gml_conformance::namespaces::{gml32, QName, GML_NAMESPACE};
#[cfg(feature = "cli")]
use gml_conformance::{CheckSettings, Verdict};

#[cfg(feature = "cli")]
#[derive(Parser, Debug)]
#[command(name = "gml-conformance")]
#[command(author, version, about = "GML conformance checks", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand, Debug)]
enum Commands {
    /// Check the points, line strings, curves and envelopes in a GML document
    Geometry {
        /// Path to the GML document
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// JSON settings file; flags below override its values
        #[arg(short, long)]
        settings: Option<PathBuf>,

        /// Ignore ordinates beyond the CRS dimension
        #[arg(long)]
        truncate: bool,

        /// Tolerance for curve segment connectivity
        #[arg(long)]
        tolerance: Option<f64>,

        /// Pretty print the output
        #[arg(short, long)]
        pretty: bool,
    },
}

#[cfg(feature = "cli")]
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Geometry {
            file,
            settings,
            truncate,
            tolerance,
            pretty,
        } => cmd_geometry(file, settings, truncate, tolerance, pretty),
    };

    match result {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Returns whether every geometry passed
#[cfg(feature = "cli")]
fn cmd_geometry(
    file: PathBuf,
    settings_path: Option<PathBuf>,
    truncate: bool,
    tolerance: Option<f64>,
    pretty: bool,
) -> Result<bool, Box<dyn std::error::Error>> {
    let mut settings = match settings_path {
        Some(path) => CheckSettings::from_json_str(&fs::read_to_string(path)?)?,
        None => CheckSettings::default(),
    };
    if truncate {
        settings = settings.with_truncation(true);
    }
    if let Some(tolerance) = tolerance {
        settings = settings.with_tolerance(tolerance);
        settings.validate()?;
    }

    let xml_content = fs::read_to_string(&file)?;
    let doc = roxmltree::Document::parse(&xml_content)?;

    let names = [
        QName::gml(gml32::POINT),
        QName::gml(gml32::LINE_STRING),
        QName::gml(gml32::CURVE),
        QName::gml(gml32::ENVELOPE),
    ];
    let registry = CrsRegistry::with_well_known();
    let reader = GeometryReader::new(&registry);
    let checker = GeometryChecker::new(settings);

    let mut all_passed = true;
    let mut output = Vec::new();
    for node in find_geometry_elements(&doc, &names) {
        let instance = match reader.read(node) {
            Ok(instance) => instance,
            Err(err) => {
                all_passed = false;
                output.push(serde_json::json!({
                    "geometry": element_label(node),
                    "error": err.to_string(),
                }));
                continue;
            }
        };
        let reports = checker.check_all(&instance)?;
        let mut rendered = Vec::with_capacity(reports.len());
        for report in &reports {
            all_passed &= report.verdict() != Verdict::Fail;
            rendered.push(report.to_json()?);
        }
        output.push(serde_json::json!({
            "geometry": instance.label(),
            "reports": rendered,
        }));
    }

    let output = serde_json::Value::Array(output);
    if pretty {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", output);
    }
    Ok(all_passed)
}

#[cfg(feature = "cli")]
fn element_label(node: roxmltree::Node<'_, '_>) -> String {
    match node.attribute((GML_NAMESPACE, "id")) {
        Some(id) => format!("{}[@gml:id='{}']", node.tag_name().name(), id),
        None => node.tag_name().name().to_string(),
    }
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Rebuild with --features cli");
    std::process::exit(1);
}
