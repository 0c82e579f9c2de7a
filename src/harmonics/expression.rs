use super::types::{BlockReconstruction, ComponentSet, HarmonicComponent};

impl HarmonicComponent {
    /// Formats the component as one line of the expression log.
    ///
    /// Layout: `<amplitude * 100>*c2p*<frequency>*x+<phase>`, every number
    /// with four decimals.
    pub fn expression_line(&self) -> String {
        format!(
            "{:.4}*c2p*{:.4}*x+{:.4}",
            100.0 * self.amplitude,
            self.frequency,
            self.phase
        )
    }
}

impl ComponentSet {
    /// Expression log lines in selection order, near-DC terms omitted
    pub fn expression_lines(&self) -> Vec<String> {
        self.oscillating().map(|c| c.expression_line()).collect()
    }

    /// Human-readable sum of cosines, near-DC terms omitted
    pub fn to_pretty_expression(&self) -> String {
        self.oscillating()
            .map(|c| {
                format!(
                    "{:.4} * cos(2π * {:.2}Hz * t + {:.4})",
                    c.amplitude, c.frequency, c.phase
                )
            })
            .collect::<Vec<String>>()
            .join(" + ")
    }
}

/// Formats one block's group: a `Block <index>:` header, the block's
/// expression lines, and a blank separator line.
pub fn format_block_expression(index: usize, components: &ComponentSet) -> String {
    let mut text = format!("Block {}:\n", index);
    for line in components.expression_lines() {
        text.push_str(&line);
        text.push('\n');
    }
    text.push('\n');
    text
}

impl BlockReconstruction {
    /// Per-block expression groups in block index order
    pub fn expressions(&self) -> Vec<String> {
        self.blocks
            .iter()
            .map(|block| format_block_expression(block.index, &block.components))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn component(frequency: f64, amplitude: f64, phase: f64) -> HarmonicComponent {
        HarmonicComponent {
            frequency,
            amplitude,
            phase,
            bin: 0,
        }
    }

    #[test]
    fn test_expression_line_format() {
        let line = component(440.0, 0.5, -1.25).expression_line();
        assert_eq!(line, "50.0000*c2p*440.0000*x+-1.2500");
    }

    #[test]
    fn test_near_dc_is_omitted() {
        let set = ComponentSet::new(vec![
            component(0.0, 0.3, 0.0),
            component(0.05, 0.1, 0.0),
            component(10.0, 0.2, 0.5),
        ]);
        assert_eq!(set.expression_lines(), vec!["20.0000*c2p*10.0000*x+0.5000"]);
        assert_eq!(set.to_pretty_expression(), "0.2000 * cos(2π * 10.00Hz * t + 0.5000)");
    }

    #[test]
    fn test_block_group_format() {
        let set = ComponentSet::new(vec![component(2.0, 0.01, 0.0)]);
        assert_eq!(
            format_block_expression(3, &set),
            "Block 3:\n1.0000*c2p*2.0000*x+0.0000\n\n"
        );
    }
}
