use chrono::Datelike;
use clap::{Parser, Subcommand};
use microsite::{compose, config, generate, output};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "microsite")]
#[command(about = "Static site generator for small-business marketing sites")]
#[command(long_about = "\
Static site generator for small-business marketing sites

The whole site is data. site.toml declares the brand, the navigation
registry, and every route as an ordered list of content blocks; building
renders each route through one shared shell (header, blocks, footer).

Site definition:

  [site]       Contact address + default metadata every route inherits
  [brand]      Business name and logo variant (text badge or image mark)
  [[nav]]      Header links, rendered in declaration order
  [[routes]]   Standard pages: id, optional [routes.meta] override, and
               ordered [[routes.blocks]] (hero, features, steps, prose)
  [[promos]]   Partner landing pages: same shape plus [promos.partner].
               Always emitted with a noindex robots directive.

Output:

  dist/index.html          ← route id \"home\"
  dist/<id>/index.html     ← every other route
  dist/404.html            ← served by static hosts for unknown paths

Metadata resolves field-by-field: route override → [site.meta] default.
A missing site.toml builds the stock site. Run 'microsite gen-config' to
print it with every option documented.")]
#[command(version)]
struct Cli {
    /// Site definition file
    #[arg(long, default_value = "site.toml", global = true)]
    config: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render every registered route into the output directory
    Build,
    /// Validate the site definition without building
    Check,
    /// Render a single route's HTML to stdout
    Render { route: String },
    /// List registered routes with their effective metadata
    Routes {
        /// Output machine-readable JSON
        #[arg(long)]
        json: bool,
    },
    /// Print a stock site.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Build => {
            let spec = config::load_site(&cli.config)?;
            let pages = generate::generate(&spec, &cli.output, current_year())?;
            output::print_build_output(&pages);
            println!("Site generated at {}", cli.output.display());
        }
        Command::Check => {
            let spec = config::load_site(&cli.config)?;
            output::print_check_output(&spec);
            println!();
            println!("Site definition is valid");
        }
        Command::Render { route } => {
            let spec = config::load_site(&cli.config)?;
            match compose::compose_route(&spec, &route) {
                Ok(doc) => {
                    let html = generate::render_page(&spec, &doc, current_year());
                    print!("{}", html.into_string());
                }
                Err(compose::ComposeError::UnknownRoute(id)) => {
                    // Not found is an answer, not a crash: emit the not-found
                    // document and flag it on the exit code.
                    eprintln!("not found: {id}");
                    let html = generate::render_not_found(&spec, current_year());
                    print!("{}", html.into_string());
                    std::process::exit(1);
                }
                Err(err) => return Err(err.into()),
            }
        }
        Command::Routes { json } => {
            let spec = config::load_site(&cli.config)?;
            let entries = output::route_listing(&spec)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                output::print_routes_output(&entries);
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_site_toml());
        }
    }

    Ok(())
}

/// The only clock read in the binary. Render paths take the year as a value.
fn current_year() -> i32 {
    chrono::Utc::now().year()
}
