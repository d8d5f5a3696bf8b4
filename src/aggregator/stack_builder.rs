//! Collapsed stacks in and out of the flamebearer format.
//!
//! Collapsed stacks are the interchange format of most profilers.
//! Format: "parent;child;grandchild weight"
//!
//! Example: "main;handle_request;parse 1000"
//! This means: main called handle_request which called parse, and 1000
//! ticks were spent in parse itself.

use crate::codec::{encode_levels, Format, RawFlamebearer, UnitKind};
use crate::model::FlamebearerModel;
use crate::utils::config::ROOT_NAME;
use crate::utils::error::BuildError;
use log::{debug, info};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

/// A single collapsed stack entry
///
/// **Public** - produced by [`collapse`] and [`parse_collapsed`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollapsedStack {
    /// Frames from outermost to innermost, joined with `;`
    pub stack: String,

    /// Ticks spent in the innermost frame
    pub weight: u64,
}

impl CollapsedStack {
    pub fn new(stack: impl Into<String>, weight: u64) -> Self {
        Self {
            stack: stack.into(),
            weight,
        }
    }

    /// `"a;b;c 42"`
    pub fn to_line(&self) -> String {
        format!("{} {}", self.stack, self.weight)
    }
}

/// Flatten a tree into collapsed stacks
///
/// **Public** - main entry point for exporting a profile
///
/// One entry per distinct path with self time, heaviest first. The
/// synthetic root is not part of the stack. For diff profiles the weight
/// is the combined self of both sides.
pub fn collapse(model: &FlamebearerModel) -> Vec<CollapsedStack> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut stacks: Vec<CollapsedStack> = Vec::new();

    for node in model.all_nodes().filter(|n| n.level > 0) {
        let weight = model.self_ticks(node);
        if weight == 0 {
            continue;
        }

        let path = model.stack(node).join(";");
        match index.get(&path) {
            Some(&i) => stacks[i].weight += weight,
            None => {
                index.insert(path.clone(), stacks.len());
                stacks.push(CollapsedStack::new(path, weight));
            }
        }
    }

    stacks.sort_by(|a, b| b.weight.cmp(&a.weight));

    debug!("Collapsed {} unique stacks", stacks.len());
    stacks
}

/// Render stacks one per line
pub fn collapsed_to_string(stacks: &[CollapsedStack]) -> String {
    let mut out = String::new();
    for stack in stacks {
        out.push_str(&stack.to_line());
        out.push('\n');
    }
    out
}

/// Parse `a;b;c 42` lines
///
/// Blank lines and lines starting with `#` are ignored. Repeated stacks
/// are kept as separate entries; the builder sums them.
///
/// # Errors
/// * `BuildError::MalformedLine` - missing or non-numeric weight, or an empty stack
pub fn parse_collapsed(text: &str) -> Result<Vec<CollapsedStack>, BuildError> {
    let mut stacks = Vec::new();

    for (i, raw_line) in text.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let malformed = || BuildError::MalformedLine {
            line: i + 1,
            content: line.to_string(),
        };

        let (stack, weight) = line.rsplit_once(char::is_whitespace).ok_or_else(malformed)?;
        let stack = stack.trim_end();
        if stack.is_empty() {
            return Err(malformed());
        }
        let weight: u64 = weight.parse().map_err(|_| malformed())?;

        stacks.push(CollapsedStack::new(stack, weight));
    }

    debug!("Parsed {} collapsed stacks", stacks.len());
    Ok(stacks)
}

/// Read and parse a collapsed stacks file
///
/// # Errors
/// * `BuildError::Io` - file cannot be read
/// * `BuildError::MalformedLine` - see [`parse_collapsed`]
pub fn read_collapsed(path: impl AsRef<Path>) -> Result<Vec<CollapsedStack>, BuildError> {
    let path = path.as_ref();
    info!("Reading collapsed stacks from: {}", path.display());

    let text = fs::read_to_string(path)?;
    parse_collapsed(&text)
}

const LEFT: usize = 0;
const RIGHT: usize = 1;

/// Call tree node with one value per side; single profiles only use the left side
#[derive(Debug, Default)]
struct StackNode {
    self_ticks: [u64; 2],
    total: [u64; 2],
    children: BTreeMap<String, StackNode>,
}

impl StackNode {
    fn insert(&mut self, frames: &[&str], side: usize, weight: u64) {
        self.total[side] += weight;
        match frames.split_first() {
            Some((head, tail)) => self
                .children
                .entry((*head).to_string())
                .or_default()
                .insert(tail, side, weight),
            None => self.self_ticks[side] += weight,
        }
    }

    fn max_self(&self) -> u64 {
        let own = self.self_ticks[LEFT].max(self.self_ticks[RIGHT]);
        self.children.values().map(StackNode::max_self).fold(own, u64::max)
    }
}

/// Builds a flamebearer payload from collapsed stacks
///
/// Children are ordered by name, so the same stacks always produce the
/// same payload regardless of input order.
#[derive(Debug)]
pub struct FlamebearerBuilder {
    root: StackNode,
    format: Format,
    units: UnitKind,
    sample_rate: u32,
    spy_name: String,
}

impl FlamebearerBuilder {
    /// Single profile from one set of stacks
    pub fn single(stacks: &[CollapsedStack]) -> Self {
        let mut builder = Self::empty(Format::Single);
        builder.add(stacks, LEFT);
        builder
    }

    /// Diff profile; stacks are matched by path
    pub fn double(baseline: &[CollapsedStack], comparison: &[CollapsedStack]) -> Self {
        let mut builder = Self::empty(Format::Double);
        builder.add(baseline, LEFT);
        builder.add(comparison, RIGHT);
        builder
    }

    fn empty(format: Format) -> Self {
        Self {
            root: StackNode::default(),
            format,
            units: UnitKind::Samples,
            sample_rate: 100,
            spy_name: String::new(),
        }
    }

    fn add(&mut self, stacks: &[CollapsedStack], side: usize) {
        for stack in stacks.iter().filter(|s| s.weight > 0) {
            let frames: Vec<&str> = stack.stack.split(';').collect();
            self.root.insert(&frames, side, stack.weight);
        }
    }

    pub fn with_units(mut self, units: UnitKind) -> Self {
        self.units = units;
        self
    }

    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    pub fn with_spy_name(mut self, spy_name: impl Into<String>) -> Self {
        self.spy_name = spy_name.into();
        self
    }

    /// Produce the delta-encoded payload
    ///
    /// # Errors
    /// * `BuildError::EmptyStacks` - no stack carried any weight
    pub fn build(&self) -> Result<RawFlamebearer, BuildError> {
        let [left, right] = self.root.total;
        if left + right == 0 {
            return Err(BuildError::EmptyStacks);
        }

        let mut emitter = LevelEmitter {
            format: self.format,
            levels: Vec::new(),
            names: Vec::new(),
            name_index: HashMap::new(),
        };
        emitter.emit(&self.root, ROOT_NAME, 0, [0, 0]);

        let levels = encode_levels(&emitter.levels, self.format)
            .into_iter()
            .map(|level| {
                level
                    .into_iter()
                    .map(|v| i64::try_from(v).unwrap_or(i64::MAX))
                    .collect()
            })
            .collect();

        let (left_ticks, right_ticks) = match self.format {
            Format::Single => (None, None),
            Format::Double => (Some(left), Some(right)),
        };

        info!(
            "Built {} flamebearer: {} levels, {} names, {} ticks",
            self.format,
            emitter.levels.len(),
            emitter.names.len(),
            left + right
        );

        Ok(RawFlamebearer {
            names: emitter.names,
            levels,
            num_ticks: left + right,
            max_self: self.root.max_self(),
            format: self.format,
            sample_rate: self.sample_rate,
            units: self.units,
            spy_name: self.spy_name.clone(),
            left_ticks,
            right_ticks,
        })
    }
}

/// Writes nodes depth-first into per-level arrays with absolute offsets
struct LevelEmitter {
    format: Format,
    levels: Vec<Vec<u64>>,
    names: Vec<String>,
    name_index: HashMap<String, usize>,
}

impl LevelEmitter {
    fn intern(&mut self, name: &str) -> u64 {
        if let Some(&i) = self.name_index.get(name) {
            return i as u64;
        }
        let i = self.names.len();
        self.names.push(name.to_string());
        self.name_index.insert(name.to_string(), i);
        i as u64
    }

    fn emit(&mut self, node: &StackNode, name: &str, depth: usize, offsets: [u64; 2]) {
        let name = self.intern(name);
        if self.levels.len() <= depth {
            self.levels.resize_with(depth + 1, Vec::new);
        }

        let level = &mut self.levels[depth];
        match self.format {
            Format::Single => level.extend([
                offsets[LEFT],
                node.total[LEFT],
                node.self_ticks[LEFT],
                name,
            ]),
            Format::Double => level.extend([
                offsets[LEFT],
                node.total[LEFT],
                node.self_ticks[LEFT],
                offsets[RIGHT],
                node.total[RIGHT],
                node.self_ticks[RIGHT],
                name,
            ]),
        }

        let mut child_offsets = offsets;
        for (child_name, child) in &node.children {
            self.emit(child, child_name, depth + 1, child_offsets);
            child_offsets[LEFT] += child.total[LEFT];
            child_offsets[RIGHT] += child.total[RIGHT];
        }
    }
}
