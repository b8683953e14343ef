//! Invoice to document projection
//!
//! `project` is a pure function of its inputs: the same invoice and texts
//! always produce the same tree, and nothing is mutated. Page breaks are
//! not decided here.

use crate::schema::*;
use invoice::{
    format_long_date, format_money, format_quantity, Invoice, InvoiceSnapshot, LineItem,
};

const ACCENT: Color = Color::from_rgb(0x6B, 0x46, 0xC1);
const SHADED: Color = Color::from_rgb(0xF9, 0xFA, 0xFB);
const RULE: Color = Color::from_rgb(0xE5, 0xE7, 0xEB);
const MUTED: Color = Color::from_rgb(0x6B, 0x72, 0x80);
const LABEL: Color = Color::from_rgb(0x4B, 0x55, 0x63);
const VALUE: Color = Color::from_rgb(0x1F, 0x29, 0x37);

/// Column widths of the items table: Item, Quantity, Rate, Amount
const COLUMNS: [f64; 4] = [40.0, 20.0, 20.0, 20.0];

/// Build the printable document for an invoice
pub fn project(invoice: &Invoice, company_name: &str, footer_text: &str) -> Document {
    Document {
        sections: vec![
            Section {
                kind: SectionKind::Title,
                node: title(company_name),
            },
            Section {
                kind: SectionKind::Metadata,
                node: metadata(invoice),
            },
            Section {
                kind: SectionKind::Billing,
                node: billing(invoice),
            },
            Section {
                kind: SectionKind::ItemsTable,
                node: items_table(invoice),
            },
            Section {
                kind: SectionKind::Totals,
                node: totals(invoice),
            },
        ],
        footer: Some(footer(footer_text)),
    }
}

/// Build the printable document from a store snapshot
pub fn project_snapshot(snapshot: &InvoiceSnapshot) -> Document {
    project(
        &snapshot.invoice,
        &snapshot.company_name,
        &snapshot.footer_text,
    )
}

fn text(
    content: impl Into<String>,
    size: f32,
    weight: FontWeight,
    color: Color,
) -> TextBuilder {
    TextBuilder {
        text: content.into(),
        style: TextStyle {
            size,
            weight,
            color,
            ..TextStyle::default()
        },
    }
}

/// A text node under construction
struct TextBuilder {
    text: String,
    style: TextStyle,
}

impl TextBuilder {
    fn align(mut self, align: Align) -> Self {
        self.style.align = align;
        self
    }

    fn line_height(mut self, line_height: f64) -> Self {
        self.style.line_height = line_height;
        self
    }

    fn margin_top(mut self, margin: f64) -> Self {
        self.style.margin_top = margin;
        self
    }

    fn node(self) -> Node {
        Node::Text(TextNode::new(self.text, self.style))
    }
}

fn stack(style: BoxStyle, children: Vec<Node>) -> Node {
    Node::Box(BoxNode { style, children })
}

fn with_margin_bottom(node: Node, margin_bottom: f64) -> Node {
    stack(
        BoxStyle {
            margin_bottom,
            ..BoxStyle::default()
        },
        vec![node],
    )
}

fn title(company_name: &str) -> Node {
    with_margin_bottom(
        text(company_name, 28.0, FontWeight::Bold, ACCENT)
            .align(Align::Center)
            .node(),
        30.0,
    )
}

fn metadata_row(label: &str, value: String) -> Node {
    let row = Node::Row(RowNode {
        cells: vec![
            Cell::new(
                Width::Points(120.0),
                vec![text(label, 11.0, FontWeight::Bold, LABEL).node()],
            ),
            Cell::new(
                Width::Flex(1.0),
                vec![text(value, 11.0, FontWeight::Regular, VALUE).node()],
            ),
        ],
        gap: 0.0,
        justify: Align::Left,
    });
    with_margin_bottom(row, 8.0)
}

fn metadata(invoice: &Invoice) -> Node {
    let mut rows = vec![
        metadata_row("Invoice No #", invoice.number().to_string()),
        metadata_row("Invoice Date", format_long_date(invoice.date())),
    ];
    if let Some(due_date) = invoice.due_date() {
        rows.push(metadata_row("Due Date", format_long_date(due_date)));
    }

    stack(
        BoxStyle {
            background: Some(SHADED),
            padding: Padding::all(20.0),
            margin_bottom: 30.0,
            ..BoxStyle::default()
        },
        rows,
    )
}

fn billing_column(heading: &str, details: &[&str]) -> Cell {
    let mut content = vec![with_margin_bottom(
        text(heading, 16.0, FontWeight::Bold, ACCENT).node(),
        12.0,
    )];
    for detail in details {
        content.push(with_margin_bottom(
            text(*detail, 11.0, FontWeight::Regular, VALUE)
                .line_height(1.4)
                .node(),
            4.0,
        ));
    }
    Cell::new(Width::Flex(1.0), content)
}

fn billing(invoice: &Invoice) -> Node {
    let billed_by = invoice.billed_by();
    let billed_to: Vec<&str> = match invoice.billed_to() {
        Some(client) => vec![client.name.as_str(), client.business.address.as_str()],
        None => Vec::new(),
    };

    let columns = Node::Row(RowNode {
        cells: vec![
            billing_column(
                "Billed By",
                &[billed_by.name.as_str(), billed_by.address.as_str()],
            ),
            billing_column("Billed To", &billed_to),
        ],
        gap: 40.0,
        justify: Align::Left,
    });

    stack(
        BoxStyle {
            background: Some(SHADED),
            padding: Padding::all(20.0),
            margin_top: 25.0,
            margin_bottom: 25.0,
            ..BoxStyle::default()
        },
        vec![columns],
    )
}

fn table_row(cells: [Vec<Node>; 4]) -> Node {
    Node::Row(RowNode {
        cells: cells
            .into_iter()
            .zip(COLUMNS)
            .map(|(content, percent)| Cell::new(Width::Percent(percent), content))
            .collect(),
        gap: 0.0,
        justify: Align::Left,
    })
}

fn table_header() -> Node {
    let header = |label: &str| vec![text(label, 11.0, FontWeight::Bold, Color::white()).node()];
    stack(
        BoxStyle {
            background: Some(ACCENT),
            padding: Padding::all(12.0),
            ..BoxStyle::default()
        },
        vec![table_row([
            header("Item"),
            header("Quantity"),
            header("Rate"),
            header("Amount"),
        ])],
    )
}

fn item_row(invoice: &Invoice, index: usize, item: &LineItem) -> Node {
    let cell = |content: String, weight: FontWeight| {
        vec![text(content, 11.0, weight, VALUE).node()]
    };

    let mut name = cell(item.name().to_string(), FontWeight::Regular);
    if let Some(description) = item.description().filter(|d| !d.is_empty()) {
        name.push(
            text(description, 10.0, FontWeight::Regular, MUTED)
                .margin_top(4.0)
                .node(),
        );
    }

    let currency = invoice.currency();
    stack(
        BoxStyle {
            background: (index % 2 == 0).then_some(SHADED),
            padding: Padding::all(12.0),
            border_bottom: Some(Border::new(1.0, RULE)),
            ..BoxStyle::default()
        },
        vec![table_row([
            name,
            cell(format_quantity(item.quantity()), FontWeight::Regular),
            cell(format_money(currency, item.rate()), FontWeight::Regular),
            cell(format_money(currency, item.amount()), FontWeight::Bold),
        ])],
    )
}

fn items_table(invoice: &Invoice) -> Node {
    let mut rows = vec![table_header()];
    rows.extend(
        invoice
            .items()
            .iter()
            .enumerate()
            .map(|(index, item)| item_row(invoice, index, item)),
    );

    stack(
        BoxStyle {
            margin_top: 25.0,
            ..BoxStyle::default()
        },
        rows,
    )
}

fn totals_row(label: &str, value: String, emphasized: bool) -> Node {
    let (size, label_color, value_color) = if emphasized {
        (14.0, ACCENT, ACCENT)
    } else {
        (12.0, LABEL, VALUE)
    };

    let row = Node::Row(RowNode {
        cells: vec![
            Cell {
                width: Width::Points(100.0),
                padding: Padding::right(20.0),
                content: vec![text(label, size, FontWeight::Bold, label_color)
                    .align(Align::Right)
                    .node()],
            },
            Cell::new(
                Width::Points(120.0),
                vec![text(value, size, FontWeight::Bold, value_color)
                    .align(Align::Right)
                    .node()],
            ),
        ],
        gap: 0.0,
        justify: Align::Right,
    });
    with_margin_bottom(row, 8.0)
}

fn totals(invoice: &Invoice) -> Node {
    let currency = invoice.currency();
    let mut rows = vec![totals_row(
        "Subtotal",
        format_money(currency, invoice.subtotal()),
        false,
    )];
    // A zero tax prints no row, same as no tax at all
    if let Some(tax) = invoice.tax().filter(|tax| *tax > 0.0) {
        rows.push(totals_row("Tax", format_money(currency, tax), false));
    }
    rows.push(totals_row(
        "Total",
        format_money(currency, invoice.total()),
        true,
    ));

    stack(
        BoxStyle {
            padding: Padding::top(20.0),
            margin_top: 30.0,
            border_top: Some(Border::new(2.0, RULE)),
            ..BoxStyle::default()
        },
        rows,
    )
}

fn footer(footer_text: &str) -> Footer {
    Footer {
        text: footer_text.to_string(),
        style: TextStyle {
            size: 10.0,
            color: MUTED,
            align: Align::Center,
            line_height: 1.5,
            ..TextStyle::default()
        },
        rule: Some(Border::new(1.0, RULE)),
        padding_top: 20.0,
    }
}
