use std::{
    fs, io,
    path::{Path, PathBuf},
};

use tpath::{
    commands::{self, MazeOptions, Output},
    settings::Settings,
    Error,
};

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[clap(version, author, about, name = "tpath")]
struct Args {
    #[clap(subcommand)]
    command: Option<Command>,
    #[clap(short, long, action, help = "Reset config to default and quit")]
    reset_config: bool,
    #[clap(short, long, action, help = "Show config path and quit")]
    show_config_path: bool,
    #[clap(long, help = "Show config in debug format and quit")]
    debug_config: bool,
    #[clap(long, global = true, help = "Use this settings file instead of the default one")]
    config: Option<PathBuf>,
    #[clap(short, long, global = true, action = clap::ArgAction::Count, help = "Print more log messages, repeatable")]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Find a path through a grid, the request is read as JSON
    Solve {
        #[clap(short, long, help = "bfs, dfs, astar or astar-euclidean")]
        strategy: Option<String>,
        #[clap(short, long, help = "Read the request from a file instead of stdin")]
        input: Option<PathBuf>,
        #[clap(long, help = "Draw the grid and the path to stderr")]
        render: bool,
    },
    /// Generate a maze and print its walls as JSON
    Maze {
        #[clap(short, long, help = "ellers, kruskal or dfs")]
        generator: Option<String>,
        #[clap(short, long)]
        rows: Option<i32>,
        #[clap(short, long)]
        columns: Option<i32>,
        #[clap(long)]
        seed: Option<u64>,
        #[clap(short, long, help = "Read the request from a file")]
        input: Option<PathBuf>,
        #[clap(long, help = "Draw the maze to stderr")]
        render: bool,
    },
}

fn read_input(path: Option<&Path>) -> Result<String, Error> {
    Ok(match path {
        Some(path) => fs::read_to_string(path)?,
        None => io::read_to_string(io::stdin())?,
    })
}

fn print(output: Output) {
    if let Some(render) = output.render {
        eprint!("{render}");
    }
    println!("{}", output.response);
}

fn main() -> Result<(), Error> {
    let args = Args::parse();
    let settings_path = args.config.clone().unwrap_or_else(Settings::default_path);

    if args.reset_config {
        Settings::reset_config(&settings_path)?;
        return Ok(());
    }

    if args.show_config_path {
        if let Some(s) = settings_path.to_str() {
            println!("{}", s);
        } else {
            println!("{:?}", settings_path);
        }
        return Ok(());
    }

    let settings = commands::setup(&settings_path, args.verbose)?;

    if args.debug_config {
        println!("{:#?}", settings);
        return Ok(());
    }

    better_panic::install();

    match args.command {
        Some(Command::Solve {
            strategy,
            input,
            render,
        }) => {
            let input = read_input(input.as_deref())?;
            print(commands::solve(
                &settings,
                strategy.as_deref(),
                &input,
                render,
            )?);
        }
        Some(Command::Maze {
            generator,
            rows,
            columns,
            seed,
            input,
            render,
        }) => {
            let input = input.as_deref().map(fs::read_to_string).transpose()?;
            let options = MazeOptions {
                generator,
                rows,
                columns,
                seed,
                render,
            };
            print(commands::maze(&settings, &options, input.as_deref())?);
        }
        None => {
            log::warn!("No command given, see --help");
        }
    }

    Ok(())
}
