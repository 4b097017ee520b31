use std::{env,
          io::{BufWriter, Write},
          fs::File,
          error::Error};
use chromatone::{Color, ColorScale, ExportFormat, DEFAULT_SEED,
                 readable_text_color};

type Err = Box<dyn Error>;

fn cell(fh: &mut impl Write, c: Color, label: &str) -> Result<(), Err> {
    let text = readable_text_color(&c);
    writeln!(fh, "  <td style=\"width: 70px; height: 50px; \
                  background-color: {c}; color: {text}; \
                  text-align: center; font-size: 11px\">\
                  {label}<br/>{c}<br/>{:.2}:1</td>",
             text.contrast(&c))?;
    Ok(())
}

fn table_of_shades(fh: &mut impl Write, scale: &ColorScale)
                   -> Result<(), Err> {
    writeln!(fh, "<table style=\"border: 0px;  border-spacing: 0px\"><tr>")?;
    for s in scale {
        cell(fh, s.color, &s.step.to_string())?;
    }
    writeln!(fh, "</tr></table><br/>")?;
    Ok(())
}

fn table_of_harmonies(fh: &mut impl Write, base: Color) -> Result<(), Err> {
    let h = base.harmonies();
    writeln!(fh, "<table style=\"border: 0px;  border-spacing: 0px\"><tr>")?;
    cell(fh, base, "base")?;
    cell(fh, h.complementary, "complementary")?;
    for c in h.analogous {
        cell(fh, c, "analogous")?;
    }
    for c in h.triadic {
        cell(fh, c, "triadic")?;
    }
    writeln!(fh, "</tr></table><br/>")?;
    Ok(())
}

fn main() -> Result<(), Err> {
    let base: Color = env::args().nth(1).as_deref().unwrap_or(DEFAULT_SEED)
        .parse()?;
    let scale = ColorScale::new(base);
    let mut fh = BufWriter::new(File::create("scale.html")?);
    writeln!(fh, "<html>\n\
                  <head>\n\
                  <title>Chromatone: scale of {base}</title>\n\
                  </head>\n\
                  <body>")?;
    writeln!(fh, "<h3>Scale</h3>")?;
    table_of_shades(&mut fh, &scale)?;
    writeln!(fh, "<h3>Harmonies</h3>")?;
    table_of_harmonies(&mut fh, base)?;
    writeln!(fh, "<h3>Export</h3>")?;
    for format in ExportFormat::ALL {
        writeln!(fh, "<p>{}</p>\n<pre>{}</pre>", format.file_name(),
                 scale.export(format))?;
    }
    writeln!(fh, "</body>\n\
                  </html>")?;
    Ok(())
}
