//! Output formatting for the phrase table and the collocation stream

use crate::colloc::{Collocation, CollocationOptions};
use crate::corpus::Vocabulary;
use crate::phrase::FrequentPhrases;
use std::io::{self, Write};

/// Write the frequent-phrase table, one phrase per line
///
/// Each line is the frequency, right-aligned to the widest (first) entry,
/// a tab, and the space-joined surface forms.
pub fn write_phrase_table<W: Write>(
    out: &mut W,
    phrases: &FrequentPhrases,
    vocab: &Vocabulary,
) -> io::Result<()> {
    let width = phrases
        .get(0)
        .map(|(_, freq)| freq.to_string().len())
        .unwrap_or(1);

    for (phrase, frequency) in phrases.iter() {
        write!(out, "{frequency:>width$}\t")?;
        let mut first = true;
        for &id in phrase.tokens() {
            if !first {
                out.write_all(b" ")?;
            }
            first = false;
            out.write_all(vocab.word(id).as_bytes())?;
        }
        out.write_all(b"\n")?;
    }
    Ok(())
}

/// Write the collocation stream as tab-separated records
///
/// The header line carries the window and nonterminal-span configuration
/// the stream was produced under, for the downstream consumer. Returns the
/// number of records written.
pub fn write_collocations<W, I>(
    out: &mut W,
    records: I,
    options: &CollocationOptions,
) -> io::Result<u64>
where
    W: Write,
    I: IntoIterator<Item = Collocation>,
{
    writeln!(
        out,
        "# window_size={}\tmin_nonterminal_span={}",
        options.window_size, options.min_nonterminal_span
    )?;

    let mut count = 0u64;
    for record in records {
        writeln!(
            out,
            "{}\t{}\t{}\t{}",
            record.rank1, record.rank2, record.position1, record.position2
        )?;
        count += 1;
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::CorpusArray;
    use crate::phrase::ExtractOptions;
    use crate::suffix::{LcpTable, SuffixArray};
    use std::io::Cursor;

    #[test]
    fn test_phrase_table_format() {
        let (corpus, vocab) =
            CorpusArray::from_reader(Cursor::new("a b a b a\n")).unwrap();
        let suffixes = SuffixArray::build(&corpus);
        let lcp = LcpTable::build(&corpus, &suffixes);
        let options = ExtractOptions {
            min_frequency: 2,
            max_phrases: 5,
            max_phrase_length: 2,
        };
        let phrases =
            FrequentPhrases::extract(&corpus, &suffixes, &lcp, &options).unwrap();

        let mut buf = Vec::new();
        write_phrase_table(&mut buf, &phrases, &vocab).unwrap();
        let text = String::from_utf8(buf).unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "3\ta");
        // Remaining entries all have frequency 2.
        for line in &lines[1..] {
            assert!(line.starts_with("2\t"), "unexpected line {:?}", line);
        }
    }

    #[test]
    fn test_empty_phrase_table() {
        let corpus = CorpusArray::new(Vec::new(), Vec::new()).unwrap();
        let vocab = Vocabulary::new();
        let suffixes = SuffixArray::build(&corpus);
        let lcp = LcpTable::build(&corpus, &suffixes);
        let phrases = FrequentPhrases::extract(
            &corpus,
            &suffixes,
            &lcp,
            &ExtractOptions::default(),
        )
        .unwrap();

        let mut buf = Vec::new();
        write_phrase_table(&mut buf, &phrases, &vocab).unwrap();
        assert!(buf.is_empty());
    }

    #[test]
    fn test_collocation_stream_format() {
        let records = vec![
            Collocation { rank1: 0, rank2: 1, position1: 0, position2: 1 },
            Collocation { rank1: 1, rank2: 0, position1: 1, position2: 2 },
        ];
        let options = CollocationOptions {
            max_phrase_length: 2,
            window_size: 5,
            min_nonterminal_span: 2,
        };

        let mut buf = Vec::new();
        let count = write_collocations(&mut buf, records, &options).unwrap();
        assert_eq!(count, 2);

        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "# window_size=5\tmin_nonterminal_span=2");
        assert_eq!(lines[1], "0\t1\t0\t1");
        assert_eq!(lines[2], "1\t0\t1\t2");
    }
}
