use svg::{
    node::{self, element::{Line, Rectangle, Text}},
    Document,
};

use crate::lib::{
    benefit::{Amount, Card},
    ledger::Ledger,
    summary::Summary,
};

/// Progress bars of a ledger, one per credit, exported as SVG
pub struct Plotter<'d> {
    data: &'d Ledger,
}

#[derive(Debug, PartialEq)]
struct Bar {
    label: String,
    used: Amount,
    total: Amount,
    color: &'static str,
}

impl<'d> Plotter<'d> {
    pub fn from(data: &'d Ledger) -> Self {
        Self { data }
    }

    pub fn save(&self, file: &str) -> std::io::Result<()> {
        svg::save(file, &self.to_drawer().render())?;
        tracing::info!(file, "progress chart written");
        Ok(())
    }

    fn to_drawer(&self) -> BarDrawer {
        let mut bars = self.data.iter()
            .map(|(id, used)| Bar {
                label: format!("{}: {}", id.card().short(), id.label()),
                used,
                total: id.cap(),
                color: COLORS[id.card() as usize],
            })
            .collect::<Vec<_>>();
        let summary = Summary::of(self.data);
        bars.push(Bar {
            label: String::from("Projected for the year"),
            used: summary.projected(),
            total: summary.possible(),
            color: COLORS[Card::COUNT],
        });
        BarDrawer { bars }
    }
}

#[derive(Debug)]
struct BarDrawer {
    bars: Vec<Bar>,
}

impl BarDrawer {
    fn render(&self) -> Document {
        let fwidth = 1000.0;
        let label_width = 380.0;
        let bar_height = 24.0;
        let spacing = 12.0;
        let margin = 20.0;
        let track = fwidth - label_width;
        let fheight = self.bars.len() as f64 * (bar_height + spacing);
        let document = self.bars.iter()
            .enumerate()
            .fold(Document::new(), |doc, (i, bar)| {
                let y = i as f64 * (bar_height + spacing);
                let caption = Text::new()
                    .set("x", 0.0)
                    .set("y", y + bar_height * 0.75)
                    .set("font-family", "sans-serif")
                    .set("font-size", 16.0)
                    .add(node::Text::new(format!("{} ({} / {})", bar.label, bar.used, bar.total)));
                let background = Rectangle::new()
                    .set("x", label_width)
                    .set("y", y)
                    .set("width", track)
                    .set("height", bar_height)
                    .set("fill", "lightgray");
                let filled = Rectangle::new()
                    .set("x", label_width)
                    .set("y", y)
                    .set("width", track * bar.used.ratio(bar.total))
                    .set("height", bar_height)
                    .set("fill", bar.color);
                doc.add(caption).add(background).add(filled)
            });
        let axis = Line::new()
            .set("x1", label_width)
            .set("x2", label_width)
            .set("y1", 0.0)
            .set("y2", fheight)
            .set("stroke", "black")
            .set("stroke-width", 2.0);
        document
            .add(axis)
            .set("viewBox", (-margin, -margin, fwidth + 2.0 * margin, fheight + 2.0 * margin))
    }
}

const COLORS: &[&str] = &[
    "gold",
    "navy",
    "teal",
    "green",
];
