// main.rs      gifenc command
//
// Copyright (c) 2019-2025  Douglas Lau
//
#![forbid(unsafe_code)]

use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use gifenc::hsv::{Hsv, HsvPixel};
use gifenc::{Encoder, Quantizer, Step};
use pix::rgb::{Rgb, SRgb8};
use pix::Raster;
use std::error::Error;
use std::fs::File;
use std::io::Write;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Crate version
const VERSION: &str = std::env!("CARGO_PKG_VERSION");

/// Wedge width
const WEDGE_WIDTH: u32 = 128;

/// Wedge height
const WEDGE_HEIGHT: u32 = 64;

/// Main entry point
fn main() -> Result<(), Box<dyn Error>> {
    env_logger::builder().format_timestamp(None).init();
    let mut out = StandardStream::stdout(ColorChoice::Auto);
    match create_app().get_matches().subcommand() {
        ("wedge", Some(matches)) => wedge(&mut out, matches)?,
        ("hsv", Some(matches)) => hsv(&mut out, matches)?,
        _ => unreachable!(),
    }
    out.reset()?;
    Ok(())
}

/// Create clap App
fn create_app() -> App<'static, 'static> {
    App::new("gifenc")
        .version(VERSION)
        .setting(AppSettings::GlobalVersion)
        .about("GIF encoder demo")
        .setting(AppSettings::ArgRequiredElseHelp)
        .subcommand(
            SubCommand::with_name("wedge")
                .about("Write a color gradient GIF")
                .arg(
                    Arg::with_name("colors")
                        .short("c")
                        .long("colors")
                        .takes_value(true)
                        .default_value("256")
                        .help("palette size"),
                )
                .arg(Arg::with_name("file").required(true).help("output file")),
        )
        .subcommand(
            SubCommand::with_name("hsv")
                .about("Convert an RGB color to packed HSV and back")
                .arg(Arg::with_name("red").required(true).help("red (0-255)"))
                .arg(
                    Arg::with_name("green")
                        .required(true)
                        .help("green (0-255)"),
                )
                .arg(
                    Arg::with_name("blue").required(true).help("blue (0-255)"),
                ),
        )
}

/// Make a color gradient raster
fn wedge_raster() -> Raster<SRgb8> {
    let (width, height) = (WEDGE_WIDTH as i32, WEDGE_HEIGHT as i32);
    let mut pixels = Vec::with_capacity((width * height) as usize);
    for i in 0..height {
        for j in 0..width {
            let (r, g, b) = (i + j, i - j, j - i);
            pixels.push(SRgb8::new(r as u8, g as u8, b as u8));
        }
    }
    Raster::with_pixels(WEDGE_WIDTH, WEDGE_HEIGHT, pixels)
}

/// Handle wedge subcommand
fn wedge(
    out: &mut StandardStream,
    matches: &ArgMatches,
) -> Result<(), Box<dyn Error>> {
    let colors = matches.value_of("colors").unwrap_or("256").parse::<usize>()?;
    let path = matches.value_of_os("file").ok_or("missing file")?;
    let quantizer = Quantizer::new(colors)?;
    let (palette, indexed) = quantizer.quantize(&wedge_raster())?;
    let n_colors = palette.len();
    let mut enc = Encoder::new(File::create(path)?)
        .into_step_enc()
        .with_palette(palette);
    enc.encode_step(&Step::with_indexed(indexed))?;
    enc.finish()?;
    let mut green = ColorSpec::new();
    green.set_fg(Some(Color::Green)).set_intense(true);
    out.set_color(&green)?;
    writeln!(
        out,
        "{:?}: {}x{}, {} colors",
        path, WEDGE_WIDTH, WEDGE_HEIGHT, n_colors
    )?;
    Ok(())
}

/// Handle hsv subcommand
fn hsv(
    out: &mut StandardStream,
    matches: &ArgMatches,
) -> Result<(), Box<dyn Error>> {
    let channel = |name: &str| -> Result<u8, Box<dyn Error>> {
        Ok(matches.value_of(name).ok_or("missing channel")?.parse::<u8>()?)
    };
    let clr = SRgb8::new(channel("red")?, channel("green")?, channel("blue")?);
    let pix = HsvPixel::from_rgb(clr);
    let hsv = Hsv::from(pix);
    let back = pix.to_rgb()?;
    let mut bold = ColorSpec::new();
    bold.set_fg(Some(Color::White)).set_intense(true).set_bold(true);
    let mut cyan = ColorSpec::new();
    cyan.set_fg(Some(Color::Cyan)).set_intense(true);
    out.set_color(&bold)?;
    writeln!(
        out,
        "hue: {}°  saturation: {}%  value: {}%",
        hsv.hue(),
        hsv.saturation(),
        hsv.value()
    )?;
    out.set_color(&cyan)?;
    let [h, s, v] = pix.to_bytes();
    writeln!(out, "packed: {:02X} {:02X} {:02X}", h, s, v)?;
    writeln!(
        out,
        "rgb: {} {} {}",
        u8::from(Rgb::red(back)),
        u8::from(Rgb::green(back)),
        u8::from(Rgb::blue(back))
    )?;
    Ok(())
}
