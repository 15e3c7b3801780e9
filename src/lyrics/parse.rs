/// One timestamped lyric line. Immutable after parsing.
#[derive(Debug, Clone, PartialEq)]
pub struct LyricLine {
    pub time_seconds: f64,
    pub text: String,
}

/// Parses an LRC-style blob into lines sorted ascending by timestamp.
/// Recognizes `[mm:ss]` and `[mm:ss.frac]` markers; a line may carry several
/// markers and expands to one entry per marker. Lines without a recognizable
/// marker are dropped. An empty or unparseable blob yields an empty vec.
pub fn parse_lrc(text: &str) -> Vec<LyricLine> {
    let mut entries = Vec::new();
    for raw_line in text.lines() {
        let mut rest = raw_line;
        let mut timestamps: Vec<f64> = Vec::new();

        while let Some(open) = rest.find('[') {
            let Some(close_rel) = rest[open..].find(']') else {
                break;
            };
            let close = open + close_rel;
            if let Some(seconds) = parse_timestamp(&rest[open + 1..close]) {
                timestamps.push(seconds);
            }
            rest = &rest[close + 1..];
        }

        let content = rest.trim();
        if !timestamps.is_empty() && !content.is_empty() {
            for time_seconds in timestamps {
                entries.push(LyricLine {
                    time_seconds,
                    text: content.to_string(),
                });
            }
        }
    }

    entries.sort_by(|a, b| a.time_seconds.total_cmp(&b.time_seconds));
    entries
}

fn parse_timestamp(tag: &str) -> Option<f64> {
    let (min_s, sec_s) = tag.split_at(tag.find(':')?);
    let sec_s = &sec_s[1..];
    let min = min_s.parse::<u64>().ok()?;

    match sec_s.find('.') {
        Some(dot) => {
            let sec = sec_s[..dot].parse::<u64>().ok()?;
            let frac = &sec_s[dot + 1..];
            let frac_value = frac.parse::<u64>().ok()?;
            let frac_seconds = frac_value as f64 / 10f64.powi(frac.len() as i32);
            Some((min * 60 + sec) as f64 + frac_seconds)
        }
        None => {
            let sec = sec_s.parse::<u64>().ok()?;
            Some((min * 60 + sec) as f64)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_formed_lines_come_out_sorted() {
        let blob = "[00:12.50]Second line\n[00:03]First line\n[01:02.1]Third line";
        let lines = parse_lrc(blob);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].text, "First line");
        assert_eq!(lines[0].time_seconds, 3.0);
        assert_eq!(lines[1].time_seconds, 12.5);
        assert_eq!(lines[2].time_seconds, 62.1);
    }

    #[test]
    fn malformed_lines_are_dropped_without_panicking() {
        let blob = "no marker at all\n[bad]text\n[00:10]kept\n[12:]broken\n[:30]broken too";
        let lines = parse_lrc(blob);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "kept");
    }

    #[test]
    fn multiple_markers_expand_to_one_entry_each() {
        let lines = parse_lrc("[00:05][00:45]Chorus");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].time_seconds, 5.0);
        assert_eq!(lines[1].time_seconds, 45.0);
        assert!(lines.iter().all(|l| l.text == "Chorus"));
    }

    #[test]
    fn empty_blob_yields_no_lines() {
        assert!(parse_lrc("").is_empty());
        assert!(parse_lrc("\n\n").is_empty());
    }

    #[test]
    fn marker_with_empty_content_is_dropped() {
        assert!(parse_lrc("[00:10]   ").is_empty());
    }
}
