use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use pdf_pages::{
    OperationResult, PageSelectionMode, PageSelectionOptions, PasswordOptions, PdfInfo, Settings,
    WatermarkOptions, WatermarkPosition,
};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "pdft", about = "PDF tools CLI", version)]
struct Cli {
    /// Settings JSON file (temp dir, size limit, allowed extensions)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Split a PDF into pages or extract selected pages
    Select {
        /// Input PDF file
        input: PathBuf,

        /// Selection mode
        #[arg(long, default_value = "all", value_enum)]
        mode: ModeArg,

        /// Pages to select, e.g. "1,3,5-8"
        #[arg(long)]
        pages: Option<String>,

        /// Output filename prefix (defaults to the input file name)
        #[arg(long)]
        prefix: Option<String>,

        /// Output directory
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Stamp a text or image watermark onto a PDF
    Watermark {
        /// Input PDF file
        input: PathBuf,

        /// Watermark text
        #[arg(long, conflicts_with = "image", required_unless_present = "image")]
        text: Option<String>,

        /// Watermark image file
        #[arg(long)]
        image: Option<PathBuf>,

        /// Position, 1-9 or a name such as top-left or center
        #[arg(long, default_value = "center", value_parser = parse_position)]
        position: WatermarkPosition,

        /// Opacity in (0, 1]
        #[arg(long, default_value = "0.5")]
        opacity: f32,

        /// Font size in points
        #[arg(long)]
        font_size: Option<f32>,

        /// Text colour as #RRGGBB
        #[arg(long)]
        color: Option<String>,

        /// Image scale in percent
        #[arg(long)]
        scale: Option<f32>,

        /// Only watermark these pages, e.g. "1,3"
        #[arg(long)]
        pages: Option<String>,

        /// Output PDF file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Concatenate PDFs in order
    Merge {
        /// Input PDF files
        #[arg(required = true, num_args = 2..)]
        input: Vec<PathBuf>,

        /// Output PDF file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Show page count and metadata
    Info {
        /// Input PDF file
        input: PathBuf,
    },

    /// Encrypt a PDF with a password
    Protect {
        /// Input PDF file
        input: PathBuf,

        /// Password required to open the document
        #[arg(long)]
        user_password: String,

        /// Password granting full access (defaults to the user password)
        #[arg(long)]
        owner_password: Option<String>,

        /// Disallow printing
        #[arg(long)]
        no_print: bool,

        /// Disallow copying text and images
        #[arg(long)]
        no_copy: bool,

        /// Disallow modifying the document
        #[arg(long)]
        no_modify: bool,

        /// Disallow adding annotations
        #[arg(long)]
        no_annotate: bool,

        /// Disallow filling in forms
        #[arg(long)]
        no_forms: bool,

        /// Output PDF file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    All,
    Pages,
    Single,
}

impl From<ModeArg> for PageSelectionMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::All => Self::AllPages,
            ModeArg::Pages => Self::SpecificPages,
            ModeArg::Single => Self::SingleFile,
        }
    }
}

fn parse_position(s: &str) -> pdf_pages::Result<WatermarkPosition> {
    s.parse()
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_target(false)
        .init();
}

async fn load_settings(config: Option<&PathBuf>) -> Result<Settings> {
    let settings = match config {
        Some(path) => Settings::load(path).await?,
        None => Settings::default(),
    };
    Ok(settings.with_env_overrides()?)
}

fn print_result(result: &OperationResult) {
    println!("{}", result.message());
    if let Some(details) = result.details() {
        println!("  {}", details);
    }
    if result.has_multiple_outputs() {
        let dir = result.output_files()[0].parent().unwrap_or(Path::new("."));
        println!("  {} files in {}", result.output_files().len(), dir.display());
    }
    for file in result.output_files() {
        println!("  → {}", file.display());
    }
}

fn print_info(info: &PdfInfo) {
    println!("File: {}", info.file_path.display());
    println!("  Pages: {}", info.pages);
    if let Some(title) = &info.title {
        println!("  Title: {}", title);
    }
    if let Some(author) = &info.author {
        println!("  Author: {}", author);
    }
    if let Some(created) = info.creation_date {
        println!("  Created: {}", created);
    }
    if let Some(size) = info.file_size {
        println!("  Size: {} bytes", size);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let settings = load_settings(cli.config.as_ref()).await?;
    log::debug!("Using temp dir {}", settings.temp_dir.display());

    match cli.command {
        Commands::Select {
            input,
            mode,
            pages,
            prefix,
            output,
        } => {
            let options = PageSelectionOptions {
                mode: mode.into(),
                pages: pages.as_deref().map(pdf_pages::parse_page_list).transpose()?,
                output_dir: output,
                filename_prefix: prefix,
                ..Default::default()
            };
            let result = pdf_pages::select_pages(settings, input, options).await?;
            print_result(&result);
        }

        Commands::Watermark {
            input,
            text,
            image,
            position,
            opacity,
            font_size,
            color,
            scale,
            pages,
            output,
        } => {
            let mut options = match (text, image) {
                (Some(text), _) => WatermarkOptions::text(text),
                (None, Some(image)) => WatermarkOptions::image(image),
                (None, None) => anyhow::bail!("either --text or --image is required"),
            };
            options.position = position;
            options.opacity = opacity;
            options.font_size = font_size;
            options.font_color = color;
            options.image_scale = scale;
            options.output_file = output;
            if let Some(pages) = pages.as_deref() {
                options.page_selection = PageSelectionMode::SpecificPages;
                options.specific_pages = Some(pdf_pages::parse_page_list(pages)?);
            }

            let result = pdf_pages::add_watermark(settings, input, options).await?;
            print_result(&result);
        }

        Commands::Merge { input, output } => {
            let result = pdf_pages::merge_pdfs(settings, input, Some(output)).await?;
            print_result(&result);
        }

        Commands::Info { input } => {
            let info = pdf_pages::pdf_info(settings, input).await?;
            print_info(&info);
        }

        Commands::Protect {
            input,
            user_password,
            owner_password,
            no_print,
            no_copy,
            no_modify,
            no_annotate,
            no_forms,
            output,
        } => {
            let mut options = PasswordOptions::new(user_password);
            options.owner_password = owner_password;
            options.allow_printing = !no_print;
            options.allow_degraded_printing = !no_print;
            options.allow_copying = !no_copy;
            options.allow_modification = !no_modify;
            options.allow_annotation = !no_annotate;
            options.allow_filling_forms = !no_forms;
            options.output_file = output;

            let result = pdf_pages::protect_pdf(settings, input, options).await?;
            print_result(&result);
        }
    }

    Ok(())
}
