#[macro_use]
extern crate log;

use std::env;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{bail, Context as _};

use glcgc::driver::{self, Driver};
use glcgc::{Converter, ConverterOptions, Profile, SemanticTable};

const USAGE: &str = "usage: glcgc [--profile NAME] [--semantics FILE] [--dump-semantics] [INPUT] [OUTPUT]

  INPUT   .glsl file or directory (default: glsl)
  OUTPUT  .cg file or directory (default: cg, stdout for a single file)";

struct Args {
  profile: Profile,
  semantics: Option<PathBuf>,
  dump: bool,
  input: PathBuf,
  output: Option<PathBuf>,
}

fn parse_args() -> anyhow::Result<Args> {
  let mut args = Args {
    profile: Profile::default(),
    semantics: None,
    dump: false,
    input: PathBuf::from("glsl"),
    output: None,
  };
  let mut positional = Vec::new();

  let mut it = env::args().skip(1);
  while let Some(arg) = it.next() {
    match arg.as_str() {
      "--profile" => {
        let name = it.next().context("--profile needs a name")?;
        args.profile = name.parse()?;
      }
      "--semantics" => {
        args.semantics = Some(it.next().context("--semantics needs a file")?.into());
      }
      "--dump-semantics" => args.dump = true,
      "-h" | "--help" => {
        println!("{}", USAGE);
        std::process::exit(0);
      }
      flag if flag.starts_with("--") => bail!("unknown flag {}\n{}", flag, USAGE),
      _ => positional.push(PathBuf::from(&arg)),
    }
  }

  let mut positional = positional.into_iter();
  if let Some(input) = positional.next() {
    args.input = input;
  }
  args.output = positional.next();
  if positional.next().is_some() {
    bail!("too many arguments\n{}", USAGE);
  }

  Ok(args)
}

fn main() -> anyhow::Result<()> {
  env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

  let args = parse_args()?;

  let mut options = ConverterOptions::with_profile(args.profile);
  if let Some(path) = &args.semantics {
    let text = driver::read(path)?;
    options.semantics = SemanticTable::parse(&text)
      .with_context(|| format!("could not load semantics from {}", path.display()))?;
  }

  if args.dump {
    print!("{}", options.semantics);
    return Ok(());
  }

  let converter = Converter::new(options);

  if args.input.is_file() {
    let source = driver::read(&args.input)?;
    let converted = converter.convert(&source);
    match &args.output {
      Some(path) => driver::write(path, &converted)?,
      None => io::stdout()
        .lock()
        .write_all(converted.as_bytes())
        .context("could not write to stdout")?,
    }
    return Ok(());
  }

  let output = args.output.unwrap_or_else(|| PathBuf::from("cg"));
  let driver = Driver::new(&args.input, output);
  let written = driver
    .run(|source| converter.convert(source))
    .with_context(|| format!("converting {}", args.input.display()))?;
  info!("converted {} shaders", written.len());

  Ok(())
}
