// ============================================================================
// SPLIT-CHUNKS CLI - Build del bundle partido
// ============================================================================
// Aplica la política vendor/common al grafo de módulos y escribe en
// `--out-dir` un `.js` por chunk, `chunk-plan.json`, `chunk-manifest.json`
// e `index.html`. El glue de `wasm-pack build --target web` se copia aparte
// al mismo directorio.
// ============================================================================

#[cfg(not(target_arch = "wasm32"))]
mod cli {
    use std::fs;
    use std::path::{Path, PathBuf};

    use anyhow::Context;
    use clap::Parser;
    use lazy_route_shell::split_chunks::{
        module_sources, plan_chunks, render_index_html, write_chunks, ChunkPlan, ModuleGraph,
        SplitChunksConfig, DEFAULT_BOOT_MODULE, DEFAULT_TEMPLATE,
    };
    use tracing_subscriber::EnvFilter;

    #[derive(Parser)]
    #[command(name = "split-chunks")]
    #[command(about = "Parte el bundle del shell en chunks vendor/common/asíncronos", long_about = None)]
    struct Cli {
        /// Grafo de módulos (JSON)
        #[arg(short, long)]
        graph: PathBuf,

        /// Política de partición (JSON); por defecto vendor + common
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Plantilla HTML del fichero de entrada
        #[arg(short, long)]
        template: Option<PathBuf>,

        /// Directorio del que leer los módulos sin `source` en el grafo
        #[arg(short, long)]
        src_root: Option<PathBuf>,

        #[arg(short, long, default_value = "dist")]
        out_dir: PathBuf,

        #[arg(long, default_value = "/")]
        public_path: String,

        /// Glue de wasm-bindgen que arranca el shell
        #[arg(long, default_value = DEFAULT_BOOT_MODULE)]
        boot_module: String,
    }

    pub fn run() -> anyhow::Result<()> {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "split_chunks=info,lazy_route_shell=info".into()),
            )
            .init();

        let cli = Cli::parse();

        let graph_json = fs::read_to_string(&cli.graph)
            .with_context(|| format!("reading module graph {}", cli.graph.display()))?;
        let graph = ModuleGraph::from_json(&graph_json)
            .with_context(|| format!("parsing module graph {}", cli.graph.display()))?;

        let config = match &cli.config {
            Some(path) => SplitChunksConfig::from_file(path)?,
            None => SplitChunksConfig::default(),
        };

        let template = match &cli.template {
            Some(path) => fs::read_to_string(path)
                .with_context(|| format!("reading template {}", path.display()))?,
            None => DEFAULT_TEMPLATE.to_string(),
        };

        let sources = module_sources(&graph, cli.src_root.as_deref())?;

        tracing::info!(
            "📦 {} módulos, {} imports, entry {}",
            graph.modules.len(),
            graph.imports.len(),
            graph.entry
        );
        let plan = plan_chunks(&graph, &config)?;
        let manifest = plan.manifest(&cli.public_path);

        fs::create_dir_all(&cli.out_dir)
            .with_context(|| format!("creating {}", cli.out_dir.display()))?;
        let written = write_chunks(&plan, &sources, &cli.out_dir)?;
        tracing::info!("✅ {} chunks escritos en {}", written.len(), cli.out_dir.display());

        write_json(&cli.out_dir.join("chunk-plan.json"), &plan)?;
        write_json(&cli.out_dir.join("chunk-manifest.json"), &manifest)?;
        let html_path = cli.out_dir.join("index.html");
        fs::write(&html_path, render_index_html(&template, &manifest, &cli.boot_module))
            .with_context(|| format!("writing {}", html_path.display()))?;

        print_report(&plan);
        Ok(())
    }

    fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        tracing::info!("escrito {}", path.display());
        Ok(())
    }

    fn print_report(plan: &ChunkPlan) {
        println!("{:<24} {:<8} {:>8}", "CHUNK", "KIND", "MODULES");
        for chunk in &plan.chunks {
            println!(
                "{:<24} {:<8} {:>8}",
                chunk.file_name(),
                format!("{:?}", chunk.kind).to_lowercase(),
                chunk.len()
            );
        }
        println!();
        for (origin, chunks) in &plan.groups {
            println!("{} -> {}", origin, chunks.join(", "));
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    cli::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {}
