//! course-query CLI - sort, select and reformat course documents
//!
//! Reads a course document from a file or standard input, applies the
//! requested query and writes the result as a course document (or a table).

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

use course_query::{
    parse_criteria, parse_sort_keys, AppConfig, Course, FileSink, FileSource, QueryPlan, ReaderSource, Result,
    RowWindow, Session, Table, WriterSink, FIELD_CATALOG,
};

#[derive(Parser)]
#[command(name = "course-query")]
#[command(version, about = "Sort, select and reformat course documents", long_about = None)]
struct Cli {
    /// Course document to read (standard input when omitted)
    #[arg(short, long, global = true)]
    input: Option<PathBuf>,

    /// YAML configuration file (defaults to $COURSE_QUERY_CONFIG)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the fields every course carries
    Fields,

    /// Show courses as a table
    Print {
        /// Show only the first N rows
        #[arg(long, conflicts_with = "bottom")]
        top: Option<usize>,

        /// Show only the last N rows
        #[arg(long)]
        bottom: Option<usize>,

        /// Index of the first column shown
        #[arg(long, default_value = "0")]
        first_column: usize,

        /// Table width (overrides display.width)
        #[arg(long)]
        width: Option<usize>,
    },

    /// Re-encode the document in canonical layout
    Format {
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Sort courses on one or more keys
    Sort {
        /// Sort key as FIELD[:asc|desc]; repeat for tie-breakers
        #[arg(short, long = "key", required = true)]
        keys: Vec<String>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Keep courses matching every criterion
    Select {
        /// Criterion as FIELD=VALUE; repeat to combine
        #[arg(short, long = "where", required = true)]
        criteria: Vec<String>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Run a YAML query plan
    Run {
        /// Path to the plan file
        #[arg(short, long)]
        plan: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Args)]
struct OutputArgs {
    /// Write the result to this .json file instead of standard output
    #[arg(short, long, conflicts_with = "in_place")]
    output: Option<PathBuf>,

    /// Write the result back to the input file
    #[arg(long)]
    in_place: bool,

    /// Replace an existing output file
    #[arg(long)]
    overwrite: bool,
}

fn main() {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("{}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = AppConfig::load(cli.config.as_deref())?;

    if let Commands::Fields = cli.command {
        for descriptor in FIELD_CATALOG.iter() {
            println!("{:<12} {}", descriptor.name, descriptor.field_type);
        }
        return Ok(());
    }

    let mut session = Session::new();
    match &cli.input {
        Some(path) => session.load(&mut FileSource::new(path))?,
        None => session.load(&mut ReaderSource::stdin())?,
    };

    match cli.command {
        Commands::Fields => Ok(()),
        Commands::Print { top, bottom, first_column, width } => {
            let window = match (top, bottom) {
                (Some(count), _) => RowWindow::Top(count),
                (None, Some(count)) => RowWindow::Bottom(count),
                (None, None) => RowWindow::All,
            };
            let table = Table::from_courses(session.courses(), window)?;
            let width = width.unwrap_or(config.display.width);
            println!("{}", table.render(width, first_column, config.display.max_columns)?);
            Ok(())
        }
        Commands::Format { output } => {
            let courses = session.courses().to_vec();
            emit(&session, &config, &courses, &output)
        }
        Commands::Sort { keys, output } => {
            let spec = parse_sort_keys(keys.as_slice())?;
            let sorted = spec.apply(session.courses());
            emit(&session, &config, &sorted, &output)
        }
        Commands::Select { criteria, output } => {
            let request = parse_criteria(criteria.as_slice())?;
            let selected = course_query::select(session.courses(), &request)?;
            if selected.is_empty() {
                tracing::warn!("No course matches the given criteria");
            }
            emit(&session, &config, &selected, &output)
        }
        Commands::Run { plan, output } => {
            let plan = QueryPlan::load_from_file(&plan)?;
            let result = plan.execute(session.courses())?;
            emit(&session, &config, &result, &output)
        }
    }
}

/// Write `courses` where the output flags point.
fn emit(session: &Session, config: &AppConfig, courses: &[Course], args: &OutputArgs) -> Result<()> {
    let mut policy = config.output.clone();
    policy.overwrite |= args.overwrite;

    if args.in_place {
        // The input file exists by construction, so writing in place always replaces it.
        policy.overwrite = true;
        session.save_to_previous(courses, &policy)?;
    } else if let Some(path) = &args.output {
        session.save(courses, &mut FileSink::new(path, policy))?;
    } else {
        session.save(courses, &mut WriterSink::stdout())?;
    }
    tracing::info!("Wrote {} courses", courses.len());
    Ok(())
}
