//! Replays gesture script and prints resulting layers as SVG path data
//!
//! Script is a sequence of lines (lines starting with `#` are ignored):
//!   pen <#rrggbb> [width]   select pen
//!   eraser [width]          select eraser
//!   width <width>           change width of current tool
//!   start <x> <y>           pointer down
//!   move <x> <y>            pointer move
//!   end | cancel            pointer up
//!   undo | redo
#![deny(warnings)]

use inkmask::*;
use std::{
    env,
    fs::File,
    io::{Read, Write},
};
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

type Error = Box<dyn std::error::Error>;

#[derive(Debug)]
struct Args {
    input_file: String,
    config_file: Option<String>,
    json: bool,
}

impl Args {
    fn parse() -> Result<Args, Error> {
        let mut result = Args {
            input_file: String::new(),
            config_file: None,
            json: false,
        };
        let mut positional = 0;
        let mut args = env::args();
        let cmd = args.next().unwrap_or_else(|| "replay".to_owned());
        while let Some(arg) = args.next() {
            match arg.as_ref() {
                "-h" => {
                    positional = 0;
                    break;
                }
                "-c" => {
                    let config = args.next().ok_or("-c requires argument")?;
                    result.config_file = Some(config);
                }
                "-j" => {
                    result.json = true;
                }
                _ => {
                    positional += 1;
                    match positional {
                        1 => result.input_file = arg,
                        _ => return Err("unexpected positional argument".into()),
                    }
                }
            }
        }
        if positional < 1 {
            eprintln!("Replays gesture script and prints layers with their masks");
            eprintln!("\nUSAGE:");
            eprintln!("    {} [-c <config.json>] [-j] <script>", cmd);
            eprintln!("\nARGS:");
            eprintln!("    -c <config.json>   session configuration");
            eprintln!("    -j                 print scene as JSON");
            eprintln!("    <script>           gesture script ('-' means stdin)");
            std::process::exit(1);
        }
        Ok(result)
    }
}

fn read_file(path: &str) -> Result<String, Error> {
    let mut contents = String::new();
    if path != "-" {
        File::open(path)?.read_to_string(&mut contents)?;
    } else {
        std::io::stdin().read_to_string(&mut contents)?;
    }
    Ok(contents)
}

fn parse_point<'a>(mut args: impl Iterator<Item = &'a str>) -> Result<Point, Error> {
    let x = args.next().ok_or("x coordinate expected")?.parse()?;
    let y = args.next().ok_or("y coordinate expected")?.parse()?;
    Ok(Point::new(x, y))
}

/// Apply single script line to the session
fn replay_line(session: &mut Session, line: &str) -> Result<(), Error> {
    let mut args = line.split_whitespace();
    let Some(cmd) = args.next().filter(|cmd| !cmd.starts_with('#')) else {
        return Ok(());
    };
    match cmd {
        "pen" => {
            let color: RGBA = args.next().ok_or("pen requires color")?.parse()?;
            session.select_pen(color);
            if let Some(width) = args.next() {
                session.set_width(width.parse()?);
            }
        }
        "eraser" => {
            session.select_eraser();
            if let Some(width) = args.next() {
                session.set_width(width.parse()?);
            }
        }
        "width" => {
            session.set_width(args.next().ok_or("width requires value")?.parse()?);
        }
        "start" => session.handle(PointerEvent::Start(parse_point(args)?))?,
        "move" => session.handle(PointerEvent::Move(parse_point(args)?))?,
        "end" => session.handle(PointerEvent::End)?,
        "cancel" => session.handle(PointerEvent::Cancel)?,
        "undo" => {
            session.undo()?;
        }
        "redo" => {
            session.redo()?;
        }
        _ => return Err(format!("unknown command: {}", cmd).into()),
    }
    Ok(())
}

fn print_scene(mut out: impl Write, scene: &Scene) -> std::io::Result<()> {
    for (index, layer) in scene.layers().iter().enumerate() {
        write!(out, "layer {}", index)?;
        if let Some(bbox) = layer.bbox() {
            write!(out, " {:?}", bbox)?;
        }
        writeln!(out)?;
        for pen in layer.pens.iter() {
            let color = match pen.kind {
                StrokeKind::Pen { color } => color.to_string(),
                StrokeKind::Eraser => String::new(),
            };
            writeln!(out, "  pen {:?} {} {} d=\"{}\"", pen.id, color, pen.width, pen.d)?;
        }
        let mask: Vec<_> = scene.mask(index).map(|eraser| eraser.id).collect();
        writeln!(out, "  mask {:?}", mask)?;
        for eraser in layer.erasers.iter() {
            writeln!(out, "  eraser {:?} {} d=\"{}\"", eraser.id, eraser.width, eraser.d)?;
        }
    }
    Ok(())
}

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_span_events(FmtSpan::CLOSE)
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse()?;
    let config = match &args.config_file {
        Some(path) => SessionConfig::from_json(&read_file(path)?)?,
        None => SessionConfig::default(),
    };
    let mut session = Session::new(config)?;

    let script = read_file(&args.input_file)?;
    tracing::debug_span!("[replay]").in_scope(|| {
        for (index, line) in script.lines().enumerate() {
            replay_line(&mut session, line)
                .map_err(|error| format!("line {}: {}", index + 1, error))?;
        }
        Ok::<_, Error>(())
    })?;

    let scene = session.scene();
    let stdout = std::io::stdout();
    if args.json {
        let mut out = stdout.lock();
        serde_json::to_writer_pretty(&mut out, &scene.to_json()?)?;
        writeln!(out)?;
    } else {
        print_scene(stdout.lock(), &scene)?;
    }
    Ok(())
}
