mod bitmap;

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::time::Duration;
use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::WrapErr;
use embedded_graphics::prelude::*;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::primitives::Rectangle;
use wave_example_app::ExampleApp;
use wave_gui::draw_target::FrameBuffer;
use wave_gui::element::Gui;
use wave_gui::element::wave::{binary_color, Shape, StyleAttrs, WaveStyle, WaveView};
use wave_gui::input::{Event, TouchEvent, TouchEventType};
use wave_gui::time::from_micros;
use bitmap::{to_text, write_pbm, Canvas};

#[derive(Parser, Debug)]
#[command(version, about = "Render and preview wave views", long_about = None)]
struct Args {
    #[command(flatten)]
    style: StyleArgs,

    /// Pixels per text character across; characters cover twice as many rows
    #[arg(long, default_value_t = 2, global = true)]
    scale: u32,

    #[command(subcommand)]
    command: Subcommands,
}

#[derive(clap::Args, Debug)]
struct StyleArgs {
    /// Wave length in pixels; the default is 10 dp scaled by density
    #[arg(long, global = true)]
    wave_length: Option<u32>,
    /// Crest height in pixels; the default is 3 dp scaled by density
    #[arg(long, global = true)]
    wave_height: Option<u32>,
    /// Outline width in pixels; the default is 2 dp scaled by density
    #[arg(long, global = true)]
    stroke_width: Option<u32>,
    /// #RRGGBB, #AARRGGBB, black, gray or white
    #[arg(long, value_parser = parse_colour, global = true)]
    stroke_color: Option<u32>,
    #[arg(long, value_parser = parse_colour, global = true)]
    fill_color: Option<u32>,
    #[arg(long, value_enum, global = true)]
    shape: Option<ShapeArg>,
    /// Length of one animation cycle in milliseconds
    #[arg(long, global = true)]
    duration: Option<u32>,
    /// Pixels per dp
    #[arg(long, default_value_t = 1.0, global = true)]
    density: f32,
}

#[derive(ValueEnum, Copy, Clone, Debug)]
enum ShapeArg {
    Circle,
    Rectangle,
}

impl From<ShapeArg> for Shape {
    fn from(value: ShapeArg) -> Self {
        match value {
            ShapeArg::Circle => Shape::Circle,
            ShapeArg::Rectangle => Shape::Rectangle,
        }
    }
}

#[derive(ValueEnum, Copy, Clone, Debug)]
enum DemoButton {
    Add,
    Anim,
}

#[derive(Subcommand, Debug)]
enum Subcommands {
    /// Draw a single frame
    Render {
        #[arg(long, default_value_t = 100)]
        width: u32,
        #[arg(long, default_value_t = 100)]
        height: u32,
        #[arg(short, long, default_value_t = 50, allow_negative_numbers = true)]
        percentage: i32,
        #[arg(short, long, default_value_t = 0)]
        move_distance: u32,
        /// Write a PBM image here instead of printing to the terminal
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Play the animation in the terminal
    Animate {
        #[arg(long, default_value_t = 60)]
        width: u32,
        #[arg(long, default_value_t = 60)]
        height: u32,
        #[arg(short, long, default_value_t = 50, allow_negative_numbers = true)]
        percentage: i32,
        #[arg(short, long, default_value_t = 20)]
        frames: u32,
        #[arg(long, default_value_t = 10)]
        fps: u32,
        /// Print frames back to back without waiting between them
        #[arg(long, action)]
        no_delay: bool,
    },

    /// Drive the demo page with scripted input and print the final frame
    Demo {
        /// Tap one of the page's buttons; may be repeated
        #[arg(long, value_enum)]
        press: Vec<DemoButton>,
        /// Tap at X,Y; may be repeated, applied after the button presses
        #[arg(long, value_parser = parse_point)]
        tap: Vec<(u16, u16)>,
        /// Frame ticks to run after the input
        #[arg(long, default_value_t = 10)]
        ticks: u32,
        #[arg(long, default_value_t = 100)]
        tick_ms: u64,
    },
}

use Subcommands::*;

fn parse_colour(s: &str) -> Result<u32, String> {
    match s.to_ascii_lowercase().as_str() {
        "black" => return Ok(0xFF00_0000),
        "gray" | "grey" => return Ok(0xFF88_8888),
        "white" => return Ok(0xFFFF_FFFF),
        _ => {},
    }

    let hex = s.strip_prefix('#').ok_or_else(|| format!("unknown colour {s:?}"))?;
    let value = u32::from_str_radix(hex, 16).map_err(|e| format!("bad colour {s:?}: {e}"))?;
    match hex.len() {
        6 => Ok(0xFF00_0000 | value),
        8 => Ok(value),
        _ => Err(format!("colour {s:?} must be #RRGGBB or #AARRGGBB")),
    }
}

fn parse_point(s: &str) -> Result<(u16, u16), String> {
    let (x, y) = s.split_once(',').ok_or_else(|| format!("expected X,Y, got {s:?}"))?;
    let x = x.trim().parse().map_err(|e| format!("bad x in {s:?}: {e}"))?;
    let y = y.trim().parse().map_err(|e| format!("bad y in {s:?}: {e}"))?;
    Ok((x, y))
}

impl StyleArgs {
    fn attrs(&self) -> StyleAttrs {
        StyleAttrs {
            wave_length: self.wave_length,
            wave_height: self.wave_height,
            stroke_width: self.stroke_width,
            stroke_color: self.stroke_color,
            fill_color: self.fill_color,
            shape: self.shape.map(|s| Shape::from(s) as u8),
            wave_duration: self.duration,
        }
    }

    fn resolve(&self) -> color_eyre::Result<WaveStyle<BinaryColor>> {
        let style = self.attrs()
            .resolve(self.density)
            .wrap_err("invalid wave style")?;
        Ok(style.map_color(binary_color))
    }
}

fn single_view(style: WaveStyle<BinaryColor>, width: u32, height: u32) -> WaveView<BinaryColor> {
    WaveView::new(Rectangle::new(Point::zero(), Size::new(width, height)), style)
        .with_background(BinaryColor::Off)
}

fn tap(app: &mut ExampleApp, fb: &mut FrameBuffer, (x, y): (u16, u16)) {
    for ev_type in [TouchEventType::Down, TouchEventType::Up] {
        app.tick(fb, Event::Touch(TouchEvent::new(ev_type, x, y)));
    }
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    let style = args.style.resolve()?;

    match args.command {
        Render { width, height, percentage, move_distance, output } => {
            let mut view = single_view(style, width, height);
            view.set_percentage(percentage);
            view.update_move_distance(move_distance);

            let mut canvas = Canvas::new(Size::new(width, height));
            let Ok(()) = view.draw(&mut canvas);

            match output {
                Some(path) => {
                    let file = File::create(&path)
                        .wrap_err_with(|| format!("failed to create {}", path.display()))?;
                    write_pbm(&canvas, &mut BufWriter::new(file))
                        .wrap_err_with(|| format!("failed to write {}", path.display()))?;
                },
                None => print!("{}", to_text(&canvas, args.scale)),
            }
        },

        Animate { width, height, percentage, frames, fps, no_delay } => {
            let fps = fps.max(1);
            let mut view = single_view(style, width, height);
            view.set_percentage(percentage);
            view.start_anim();

            let mut canvas = Canvas::new(Size::new(width, height));
            for frame in 0..frames {
                view.advance(from_micros(frame as u64 * 1_000_000 / fps as u64));
                let Ok(()) = view.draw(&mut canvas);

                println!("frame {frame} (move distance {})", view.move_distance());
                print!("{}", to_text(&canvas, args.scale));

                if !no_delay {
                    std::thread::sleep(Duration::from_micros(1_000_000 / fps as u64));
                }
            }
        },

        Demo { press, tap: taps, ticks, tick_ms } => {
            let mut fb = FrameBuffer::new();
            let mut app = ExampleApp::new(style);
            app.draw_init(&mut fb);
            app.tick(&mut fb, Event::Tick(from_micros(0)));

            for button in press {
                let area = match button {
                    DemoButton::Add => app.add_button_area(),
                    DemoButton::Anim => app.anim_button_area(),
                };
                let centre = area.center();
                tap(&mut app, &mut fb, (centre.x as u16, centre.y as u16));
            }

            for point in taps {
                tap(&mut app, &mut fb, point);
            }

            for i in 1..=ticks as u64 {
                app.tick(&mut fb, Event::Tick(from_micros(i * tick_ms * 1000)));
            }

            print!("{}", to_text(&fb, args.scale));
            let wave = app.wave();
            println!(
                "percentage {}, move distance {}, animating {}",
                wave.percentage(),
                wave.move_distance(),
                wave.is_anim_running(),
            );
        },
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("black", 0xFF00_0000)]
    #[case("Gray", 0xFF88_8888)]
    #[case("#123456", 0xFF12_3456)]
    #[case("#80FFFFFF", 0x80FF_FFFF)]
    fn colours_parse(#[case] input: &str, #[case] expected: u32) {
        assert_eq!(parse_colour(input), Ok(expected));
    }

    #[rstest]
    #[case("red")]
    #[case("#12345")]
    #[case("#GGGGGG")]
    fn bad_colours_are_rejected(#[case] input: &str) {
        assert!(parse_colour(input).is_err());
    }

    #[test]
    fn points_parse() {
        assert_eq!(parse_point("12, 300"), Ok((12, 300)));
        assert!(parse_point("12").is_err());
    }

    #[test]
    fn cli_builds_style_attrs() {
        let args = Args::parse_from([
            "wavetool", "--wave-length", "20", "--shape", "rectangle", "--fill-color", "white",
            "render", "--percentage", "70",
        ]);
        let attrs = args.style.attrs();
        assert_eq!(attrs.wave_length, Some(20));
        assert_eq!(attrs.shape, Some(1));
        assert_eq!(attrs.fill_color, Some(0xFFFF_FFFF));
        assert_eq!(attrs.wave_height, None);
        assert!(matches!(args.command, Render { percentage: 70, .. }));
    }

    #[test]
    fn zero_duration_is_reported() {
        let args = Args::parse_from(["wavetool", "--duration", "0", "render"]);
        assert!(args.style.resolve().is_err());
    }

    #[test]
    fn explicit_dimensions_are_pixels() {
        let args = Args::parse_from(["wavetool", "--density", "2", "--wave-length", "10", "render"]);
        let style = args.style.resolve().unwrap();
        assert_eq!(style.wave_length, 10);
        assert_eq!(style.wave_height, 6);
    }
}
