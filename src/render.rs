//! Dependency-tree SVG rendering in the "displacy" arc style: words along a
//! baseline with their tag underneath, arcs stacked by span length above them.

use std::fmt::Write as _;

use uuid::Uuid;

use crate::config::RenderConfig;
use crate::nlp::ParsedSentence;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArcDirection {
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepWord {
    pub text: String,
    pub tag: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepArc {
    pub start: usize,
    pub end: usize,
    pub label: String,
    pub direction: ArcDirection,
}

/// Words and arcs ready for drawing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DepTree {
    pub words: Vec<DepWord>,
    pub arcs: Vec<DepArc>,
}

impl DepTree {
    /// Build the drawable tree. With `collapse_punct`, punctuation following a
    /// word is merged into it ("duerme" + "." becomes "duerme.") and arcs
    /// internal to the merged word disappear.
    pub fn from_parsed(parsed: &ParsedSentence, collapse_punct: bool) -> Self {
        let tokens = &parsed.tokens;
        let n = tokens.len();
        let is_punct = |i: usize| tokens[i].pos == "PUNCT";

        let mut group_of = vec![0usize; n];
        let mut groups: Vec<(usize, usize)> = Vec::new();
        let mut i = 0;
        while i < n {
            let start = i;
            let mut end = i + 1;
            if collapse_punct && !is_punct(i) {
                while end < n && is_punct(end) {
                    end += 1;
                }
            }
            for slot in &mut group_of[start..end] {
                *slot = groups.len();
            }
            groups.push((start, end));
            i = end;
        }

        let words = groups
            .iter()
            .map(|&(start, end)| {
                let mut text = String::new();
                for k in start..end {
                    text.push_str(&tokens[k].text);
                    if k + 1 < end && tokens[k].whitespace {
                        text.push(' ');
                    }
                }
                DepWord {
                    text,
                    tag: tokens[start].pos.clone(),
                }
            })
            .collect();

        let mut arcs = Vec::new();
        for (g, &(start, _)) in groups.iter().enumerate() {
            let token = &tokens[start];
            let Some(&head) = group_of.get(token.head) else {
                continue;
            };
            if head == g {
                continue;
            }
            let (start, end, direction) = if g < head {
                (g, head, ArcDirection::Left)
            } else {
                (head, g, ArcDirection::Right)
            };
            arcs.push(DepArc {
                start,
                end,
                label: token.dep.clone(),
                direction,
            });
        }

        Self { words, arcs }
    }
}

#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub compact: bool,
    pub bg: String,
    pub color: String,
    pub font: String,
    pub lang: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::from(&RenderConfig::default())
    }
}

impl From<&RenderConfig> for RenderOptions {
    fn from(config: &RenderConfig) -> Self {
        Self {
            compact: config.compact,
            bg: config.bg.clone(),
            color: config.color.clone(),
            font: config.font.clone(),
            lang: config.lang.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DependencyRenderer {
    options: RenderOptions,
    distance: f64,
    offset_x: f64,
    word_spacing: f64,
    arrow_spacing: f64,
    arrow_width: f64,
    arrow_stroke: f64,
}

/// Per-render geometry.
struct Layout {
    id: String,
    levels: Vec<usize>,
    highest_level: usize,
    offset_y: f64,
}

impl DependencyRenderer {
    pub fn new(options: RenderOptions) -> Self {
        let compact = options.compact;
        Self {
            options,
            distance: if compact { 85.0 } else { 175.0 },
            offset_x: 50.0,
            word_spacing: 45.0,
            arrow_spacing: if compact { 12.0 } else { 20.0 },
            arrow_width: if compact { 6.0 } else { 10.0 },
            arrow_stroke: 2.0,
        }
    }

    pub fn render(&self, tree: &DepTree) -> String {
        let levels = arc_levels(&tree.arcs);
        let highest_level = levels.iter().copied().max().unwrap_or(0);
        let layout = Layout {
            id: Uuid::new_v4().simple().to_string(),
            offset_y: self.distance / 2.0 * highest_level as f64 + self.arrow_stroke,
            levels,
            highest_level,
        };

        let width = self.offset_x + tree.words.len() as f64 * self.distance;
        let height = layout.offset_y + 3.0 * self.word_spacing;

        let mut content = String::new();
        for (i, word) in tree.words.iter().enumerate() {
            self.render_word(&mut content, &layout, word, i);
        }
        for (i, arc) in tree.arcs.iter().enumerate() {
            self.render_arc(&mut content, &layout, arc, i);
        }

        format!(
            concat!(
                r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" "#,
                r#"xml:lang="{lang}" id="{id}" class="displacy" width="{width}" height="{height}" direction="ltr" "#,
                r#"style="max-width: none; height: {height}px; color: {color}; background: {bg}; font-family: {font}; direction: ltr">"#,
                "{content}</svg>"
            ),
            lang = escape_html(&self.options.lang),
            id = layout.id,
            width = num(width),
            height = num(height),
            color = escape_html(&self.options.color),
            bg = escape_html(&self.options.bg),
            font = escape_html(&self.options.font),
            content = content,
        )
    }

    fn render_word(&self, out: &mut String, layout: &Layout, word: &DepWord, i: usize) {
        let x = num(self.offset_x + i as f64 * self.distance);
        let y = num(layout.offset_y + self.word_spacing);
        let _ = write!(
            out,
            concat!(
                "\n<text class=\"displacy-token\" fill=\"currentColor\" text-anchor=\"middle\" y=\"{y}\">\n",
                "    <tspan class=\"displacy-word\" fill=\"currentColor\" x=\"{x}\">{text}</tspan>\n",
                "    <tspan class=\"displacy-tag\" dy=\"2em\" fill=\"currentColor\" x=\"{x}\">{tag}</tspan>\n",
                "</text>\n"
            ),
            x = x,
            y = y,
            text = escape_html(&word.text),
            tag = escape_html(&word.tag),
        );
    }

    fn render_arc(&self, out: &mut String, layout: &Layout, arc: &DepArc, i: usize) {
        let level = layout.levels[i] as f64;
        let x_start = self.offset_x + arc.start as f64 * self.distance + self.arrow_spacing;
        let y = layout.offset_y;
        let x_end = self.offset_x + (arc.end - arc.start) as f64 * self.distance + arc.start as f64 * self.distance
            - self.arrow_spacing * (layout.highest_level as f64 - level) / 4.0;

        let mut y_curve = if self.options.compact {
            layout.offset_y - level * self.distance / 6.0
        } else {
            layout.offset_y - level * self.distance / 2.0
        };
        if y_curve == 0.0 && layout.highest_level > 5 {
            y_curve = -self.distance;
        }

        let _ = write!(
            out,
            concat!(
                "\n<g class=\"displacy-arrow\">\n",
                "    <path class=\"displacy-arc\" id=\"arrow-{id}-{i}\" stroke-width=\"{stroke}px\" d=\"{arc}\" fill=\"none\" stroke=\"currentColor\"/>\n",
                "    <text dy=\"1.25em\" style=\"font-size: 0.8em; letter-spacing: 1px\">\n",
                "        <textPath xlink:href=\"#arrow-{id}-{i}\" class=\"displacy-label\" startOffset=\"50%\" side=\"left\" fill=\"currentColor\" text-anchor=\"middle\">{label}</textPath>\n",
                "    </text>\n",
                "    <path class=\"displacy-arrowhead\" d=\"{head}\" fill=\"currentColor\"/>\n",
                "</g>\n"
            ),
            id = layout.id,
            i = i,
            stroke = num(self.arrow_stroke),
            arc = self.arc_path(x_start, y, y_curve, x_end),
            label = escape_html(&arc.label),
            head = self.arrowhead(arc.direction, x_start, y, x_end),
        );
    }

    fn arc_path(&self, x: f64, y: f64, y_curve: f64, x_end: f64) -> String {
        let (x, y, c, e) = (num(x), num(y), num(y_curve), num(x_end));
        if self.options.compact {
            format!("M{x},{y} {x},{c} {e},{c} {e},{y}")
        } else {
            format!("M{x},{y} C{x},{c} {e},{c} {e},{y}")
        }
    }

    /// Arrowhead at the dependent's end of the arc.
    fn arrowhead(&self, direction: ArcDirection, x: f64, y: f64, end: f64) -> String {
        let (p1, p2, p3) = match direction {
            ArcDirection::Left => (x, x - self.arrow_width + 2.0, x + self.arrow_width - 2.0),
            ArcDirection::Right => (end, end + self.arrow_width - 2.0, end - self.arrow_width + 2.0),
        };
        format!(
            "M{},{} L{},{} {},{}",
            num(p1),
            num(y + 2.0),
            num(p2),
            num(y - self.arrow_width),
            num(p3),
            num(y - self.arrow_width)
        )
    }
}

/// Stack arcs so that shorter arcs sit below the longer arcs spanning them.
fn arc_levels(arcs: &[DepArc]) -> Vec<usize> {
    let length = arcs.iter().map(|a| a.end).max().unwrap_or(0);
    let mut max_level = vec![0usize; length];
    let mut levels = vec![0usize; arcs.len()];

    let mut order: Vec<usize> = (0..arcs.len()).collect();
    order.sort_by_key(|&i| arcs[i].end - arcs[i].start);

    for i in order {
        let arc = &arcs[i];
        let level = max_level[arc.start..arc.end].iter().copied().max().unwrap_or(0) + 1;
        for slot in &mut max_level[arc.start..arc.end] {
            *slot = level;
        }
        levels[i] = level;
    }

    levels
}

fn num(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
