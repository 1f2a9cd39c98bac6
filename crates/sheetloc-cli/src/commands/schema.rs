use std::fs;
use std::path::PathBuf;

pub fn run_schema(out_dir: PathBuf) -> color_eyre::Result<()> {
    fs::create_dir_all(&out_dir)?;
    macro_rules! dump {
        ($ty:ty, $name:literal) => {{
            let schema = schemars::schema_for!($ty);
            let path = out_dir.join($name);
            let f = std::fs::File::create(&path)?;
            serde_json::to_writer_pretty(f, &schema)?;
            tracing::debug!(event = "schema_written", path = %path.display());
        }};
    }
    dump!(sheetloc_domain::ExportSummary, "export_summary.schema.json");
    dump!(sheetloc_domain::ImportSummary, "import_summary.schema.json");
    dump!(sheetloc_domain::CatalogFileStat, "catalog_file_stat.schema.json");
    ui_ok!("schemas written to {}", out_dir.display());
    Ok(())
}
