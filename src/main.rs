//! activity-ring - Render activity ring progress indicators to PNG.

use std::{path::PathBuf, process::ExitCode};

use lexopt::prelude::*;

use activity_ring::{
    ActivityRing, EaseOut, Error, Font, Overlay, PALETTE_DARK, PALETTE_LIGHT, Palette,
    PercentageLabel, RingAnimator, RingBuilder, Rgba, detect_palette,
};

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("activity-ring: {e}");
            ExitCode::from(100)
        }
    }
}

/// Unset options keep the palette defaults; `Some(None)` removes a layer.
#[derive(Default)]
struct Options {
    progress: f32,
    radius: Option<f32>,
    thickness: Option<f32>,
    color: Option<Rgba>,
    tip_color: Option<Rgba>,
    background_color: Option<Option<Rgba>>,
    outline_color: Option<Option<Rgba>>,
    outline_thickness: Option<f32>,
    tip_shadow_color: Option<Option<Rgba>>,
    theme: Theme,
    scale: f32,
    label: bool,
    font: Option<PathBuf>,
    output: PathBuf,
    animate_from: Option<f32>,
    frames: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Theme {
    #[default]
    Light,
    Dark,
    Auto,
}

impl Theme {
    fn palette(self) -> &'static Palette {
        match self {
            Theme::Light => &PALETTE_LIGHT,
            Theme::Dark => &PALETTE_DARK,
            Theme::Auto => detect_palette(),
        }
    }
}

fn run() -> Result<(), Error> {
    let Some(opts) = parse_args()? else {
        return Ok(());
    };

    let palette = opts.theme.palette();
    let mut builder = RingBuilder::with_palette(palette);
    if let Some(radius) = opts.radius {
        builder = builder.radius(radius);
    }
    if let Some(thickness) = opts.thickness {
        builder = builder.thickness(thickness);
    }
    if let Some(color) = opts.color {
        builder = builder.color(color);
    }
    builder = builder.tip_color(opts.tip_color);
    if let Some(color) = opts.background_color {
        builder = builder.background_color(color);
    }
    if let Some(color) = opts.outline_color {
        builder = builder.outline_color(color);
    }
    if let Some(thickness) = opts.outline_thickness {
        builder = builder.outline_thickness(thickness);
    }
    if let Some(color) = opts.tip_shadow_color {
        builder = builder.tip_shadow_color(color);
    }
    let ring = ActivityRing::new(builder.build());

    if opts.label {
        let font = match &opts.font {
            Some(path) => Font::from_file(path)?,
            None => Font::system()?,
        };
        let label = PercentageLabel::new(font).color(palette.label);
        write_output(&ring.overlay(label), &opts)
    } else {
        write_output(&ring, &opts)
    }
}

fn write_output<O: Overlay>(ring: &ActivityRing<O>, opts: &Options) -> Result<(), Error> {
    let Some(from) = opts.animate_from else {
        let canvas = ring.render_scaled(opts.progress, opts.scale);
        canvas.save_png(&opts.output)?;
        log::info!("wrote {}", opts.output.display());
        return Ok(());
    };

    let mut animator = RingAnimator::new(from).with_ease(EaseOut::for_frame(1.0, opts.frames as f32 / 2.0));
    animator.set_target(opts.progress);
    for frame in 0..opts.frames {
        animator.tick();
        let path = frame_path(&opts.output, frame);
        ring.render_frame(&animator, opts.scale).save_png(&path)?;
        log::info!("wrote {}", path.display());
    }
    Ok(())
}

/// `ring.png` becomes `ring-000.png`, `ring-001.png`, ...
fn frame_path(output: &std::path::Path, frame: u32) -> PathBuf {
    let stem = output
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "ring".to_string());
    let ext = output
        .extension()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "png".to_string());
    output.with_file_name(format!("{stem}-{frame:03}.{ext}"))
}

fn parse_args() -> Result<Option<Options>, Error> {
    let mut parser = lexopt::Parser::from_env();
    let mut opts = Options {
        scale: 1.0,
        output: PathBuf::from("ring.png"),
        frames: 30,
        ..Default::default()
    };

    while let Some(arg) = parser.next()? {
        match arg {
            Long("help") | Short('h') => {
                print_help();
                return Ok(None);
            }
            Long("version") => {
                println!("activity-ring {VERSION}");
                return Ok(None);
            }

            Long("progress") | Short('p') => opts.progress = parse_f32(&mut parser, "progress")?,
            Long("radius") => opts.radius = Some(parse_f32(&mut parser, "radius")?),
            Long("thickness") => opts.thickness = Some(parse_f32(&mut parser, "thickness")?),
            Long("color") => opts.color = Some(parse_color(&mut parser)?),
            Long("tip-color") => opts.tip_color = Some(parse_color(&mut parser)?),
            Long("background-color") => opts.background_color = Some(Some(parse_color(&mut parser)?)),
            Long("no-background") => opts.background_color = Some(None),
            Long("outline-color") => opts.outline_color = Some(Some(parse_color(&mut parser)?)),
            Long("no-outline") => opts.outline_color = Some(None),
            Long("outline-thickness") => {
                opts.outline_thickness = Some(parse_f32(&mut parser, "outline thickness")?)
            }
            Long("tip-shadow-color") => opts.tip_shadow_color = Some(Some(parse_color(&mut parser)?)),
            Long("no-shadow") => opts.tip_shadow_color = Some(None),
            Long("theme") => {
                opts.theme = match parser.value()?.string()?.as_str() {
                    "light" => Theme::Light,
                    "dark" => Theme::Dark,
                    "auto" => Theme::Auto,
                    other => return Err(Error::InvalidArgument(format!("unknown theme: {other}"))),
                }
            }
            Long("scale") => opts.scale = parse_f32(&mut parser, "scale")?,
            Long("label") => opts.label = true,
            Long("font") => opts.font = Some(PathBuf::from(parser.value()?)),
            Long("output") | Short('o') => opts.output = PathBuf::from(parser.value()?),
            Long("animate-from") => opts.animate_from = Some(parse_f32(&mut parser, "animate-from")?),
            Long("frames") => {
                let value = parser.value()?.string()?;
                opts.frames = value
                    .parse::<u32>()
                    .map_err(|_| Error::InvalidArgument(format!("frames: {value}")))?
                    .max(1);
            }

            Value(val) => {
                // Positional argument - treat as progress
                let value = val.string()?;
                opts.progress = value
                    .parse()
                    .map_err(|_| Error::InvalidArgument(format!("progress: {value}")))?;
            }

            _ => return Err(arg.unexpected().into()),
        }
    }

    Ok(Some(opts))
}

fn parse_f32(parser: &mut lexopt::Parser, name: &str) -> Result<f32, Error> {
    let value = parser.value()?.string()?;
    value
        .parse()
        .map_err(|_| Error::InvalidArgument(format!("{name}: {value}")))
}

fn parse_color(parser: &mut lexopt::Parser) -> Result<Rgba, Error> {
    let value = parser.value()?.string()?;
    Rgba::parse_hex(&value).ok_or_else(|| Error::InvalidArgument(format!("color: {value}")))
}

fn print_help() {
    println!(
        r#"activity-ring {VERSION} - Render activity ring progress indicators

USAGE:
    activity-ring [OPTIONS] [PROGRESS]

PROGRESS is a fraction of one lap: 0.5 is half a ring, 1.25 is one lap and a quarter.

OPTIONS:
    -p, --progress=P            Progress to render (default 0)
    --radius=R                  Radius of the arc centerline (default 30)
    --thickness=T               Stroke width of the arc (default 10)
    --color=HEX                 Arc color at the start of the lap
    --tip-color=HEX             Arc color at the tip (default: --color)
    --background-color=HEX      Track color drawn under the arc
    --no-background             Do not draw the track
    --outline-color=HEX         Color of the two guide circles
    --no-outline                Do not draw the guide circles
    --outline-thickness=W       Width of the guide circles (default 1)
    --tip-shadow-color=HEX      Shadow color under the tip (default #0000004d)
    --no-shadow                 Do not draw the tip shadow
    --theme=light|dark|auto     Default color palette (default light)
    --scale=S                   Pixel density multiplier (default 1)
    --label                     Draw the percentage in the middle
    --font=PATH                 Font for --label (default: search system fonts)
    -o, --output=PATH           Output PNG (default ring.png)
    --animate-from=P            Write an eased frame sequence from P to PROGRESS
    --frames=N                  Number of frames for --animate-from (default 30)
    -h, --help                  Print this help message
    --version                   Print version information

EXAMPLES:
    activity-ring 0.73 --label -o ring.png
    activity-ring --progress=1.3 --tip-color=#ff2d55 --scale=2
    activity-ring 1.0 --animate-from=0 --frames=45 -o frames/ring.png

EXIT CODES:
    0   Success
    100 Error occurred

Set RUST_LOG=debug to trace geometry per frame.
"#
    );
}
