use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors produced while loading an observation file. Both variants are
/// fatal to the run: there is no recovery path for unreadable data.
#[derive(Debug, Error)]
pub enum SampleError {

    #[error("could not read observation file: {0}")]
    Read(#[from] std::io::Error),

    #[error("non-integer token '{token}' at position {pos}")]
    Parse { token : String, pos : usize }

}

/// An ordered sequence of integer-valued observations, immutable once loaded.
/// Samples hold independent observations and interface directly with the
/// likelihood of the candidate families; their only summaries of interest here
/// are the extrema (which drive the bound-guessing heuristic) and the
/// count per distinct value (which drives the frequency chart).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample {

    obs : Vec<i64>

}

impl Sample {

    /// Reads a whitespace/newline-separated text file of integer tokens.
    /// There is no header and no schema; any non-integer token fails the load.
    pub fn open<P : AsRef<Path>>(path : P) -> Result<Self, SampleError> {
        let content = fs::read_to_string(path)?;
        let mut obs = Vec::new();
        for (pos, token) in content.split_whitespace().enumerate() {
            let value = token.parse::<i64>()
                .map_err(|_| SampleError::Parse { token : token.to_string(), pos })?;
            obs.push(value);
        }
        Ok(Self { obs })
    }

    pub fn from_vec(obs : Vec<i64>) -> Self {
        Self { obs }
    }

    pub fn len(&self) -> usize {
        self.obs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obs.is_empty()
    }

    pub fn as_slice(&self) -> &[i64] {
        &self.obs[..]
    }

    pub fn min(&self) -> Option<i64> {
        self.obs.iter().copied().min()
    }

    pub fn max(&self) -> Option<i64> {
        self.obs.iter().copied().max()
    }

    /// Occurrence count per distinct value, in ascending order of the values.
    pub fn counts(&self) -> Vec<(i64, u64)> {
        let mut sorted = self.obs.clone();
        sorted.sort_unstable();
        let mut counts : Vec<(i64, u64)> = Vec::new();
        for value in sorted {
            match counts.last_mut() {
                Some((v, n)) if *v == value => *n += 1,
                _ => counts.push((value, 1))
            }
        }
        counts
    }

}

#[test]
fn parse_whitespace_separated() {
    let dir = std::env::temp_dir().join("fitdist_sample_parse");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("obs.txt");
    std::fs::write(&path, "1 2 3\n4\t5\n").unwrap();
    let sample = Sample::open(&path).unwrap();
    assert_eq!(sample.as_slice(), &[1, 2, 3, 4, 5]);
    assert_eq!(sample.min(), Some(1));
    assert_eq!(sample.max(), Some(5));
}

#[test]
fn reject_non_integer_tokens() {
    let dir = std::env::temp_dir().join("fitdist_sample_reject");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("bad.txt");
    std::fs::write(&path, "1 2 x 4").unwrap();
    match Sample::open(&path) {
        Err(SampleError::Parse { token, pos }) => {
            assert_eq!(token, "x");
            assert_eq!(pos, 2);
        },
        other => panic!("expected parse error, got {:?}", other)
    }
}

#[test]
fn counts_ascending() {
    let sample = Sample::from_vec(vec![3, 1, 3, 2, 3, 1]);
    assert_eq!(sample.counts(), vec![(1, 2), (2, 1), (3, 3)]);
}
