//! Readers for the MovingAI benchmark formats: `.map` octile grids and
//! `.scen` scenario files.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::{Grid, Point};

/// Failure to read a map or scenario file.
#[derive(Error, Debug)]
pub enum MapError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("line {line}: {message}")]
    Format { line: usize, message: String },
}

fn format_err(line: usize, message: impl Into<String>) -> MapError {
    MapError::Format {
        line,
        message: message.into(),
    }
}

/// One search problem of a scenario.
#[derive(Clone, Debug, PartialEq)]
pub struct Problem {
    pub bucket: u32,
    pub start: Point,
    pub goal: Point,
    /// Optimal path length as published with the benchmark (√2 diagonals, no
    /// corner cutting).
    pub optimal: f64,
}

/// A scenario: a map and the problems posed on it.
#[derive(Clone, Debug, PartialEq)]
pub struct Scenario {
    /// Map file as named by the scenario, resolved against the scenario's
    /// directory when read through [`load_scenario`].
    pub map: PathBuf,
    pub width: i32,
    pub height: i32,
    pub instances: Vec<Problem>,
}

/// Read an octile map. Passable terrain (`.`, `G`, `S`) becomes cell value 1,
/// everything else 0.
pub fn read_map(reader: impl BufRead) -> Result<Grid<i32>, MapError> {
    let mut lines = reader.lines();
    let mut next_line = |line: usize| -> Result<String, MapError> {
        lines
            .next()
            .transpose()?
            .ok_or_else(|| format_err(line, "unexpected end of file"))
    };

    let (key, value) = field(1, &next_line(1)?)?;
    if key != "type" {
        return Err(format_err(1, "expected first line to be type"));
    }
    if value != "octile" {
        return Err(format_err(1, format!("unsupported map type {value}")));
    }

    let height = dimension(2, "height", &next_line(2)?)?;
    let width = dimension(3, "width", &next_line(3)?)?;

    if next_line(4)?.trim() != "map" {
        return Err(format_err(4, "expected map token"));
    }

    let mut map = Grid::new(width, height, |_, _| 0);
    for y in 0..height {
        let line = 5 + y as usize;
        let row = next_line(line)?;
        let row = row.trim_end();
        if row.chars().count() != width as usize {
            return Err(format_err(line, format!("expected {width} columns")));
        }
        for (x, cell) in row.chars().enumerate() {
            map[Point::new(x as i32, y)] = i32::from(matches!(cell, '.' | 'G' | 'S'));
        }
    }

    Ok(map)
}

/// Read a version 1 scenario file.
pub fn read_scenario(reader: impl BufRead) -> Result<Scenario, MapError> {
    let mut lines = reader.lines().enumerate();

    let Some((_, version_line)) = lines.next() else {
        return Err(format_err(1, "unexpected end of file"));
    };
    let (version, number) = field(1, &version_line?)?;
    if version != "version" {
        return Err(format_err(1, format!("expected version, got {version}")));
    }
    if number != "1" && number != "1.0" {
        return Err(format_err(1, format!("unsupported version number: {number}")));
    }

    let mut map: Option<(String, i32, i32)> = None;
    let mut instances = vec![];

    for (index, line) in lines {
        let line_number = index + 1;
        let line = line?;
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.is_empty() {
            continue;
        }
        let &[bucket, problem_map, w, h, sx, sy, gx, gy, optimal] = tokens.as_slice() else {
            return Err(format_err(line_number, "expected 9 fields"));
        };

        let parse_err = |field: &str| format_err(line_number, format!("invalid {field}"));
        let int = |token: &str, field: &str| token.parse::<i32>().map_err(|_| parse_err(field));

        let bucket = bucket.parse().map_err(|_| parse_err("bucket"))?;
        let width = int(w, "map width")?;
        let height = int(h, "map height")?;
        let start = Point::new(int(sx, "start x")?, int(sy, "start y")?);
        let goal = Point::new(int(gx, "goal x")?, int(gy, "goal y")?);
        let optimal = optimal.parse().map_err(|_| parse_err("optimal length"))?;

        match &map {
            Some((name, map_width, map_height)) => {
                if name != problem_map {
                    return Err(format_err(line_number, "problem specifies different map"));
                }
                if (*map_width, *map_height) != (width, height) {
                    return Err(format_err(line_number, "problem specifies incorrect map size"));
                }
            }
            None => map = Some((problem_map.to_owned(), width, height)),
        }

        instances.push(Problem {
            bucket,
            start,
            goal,
            optimal,
        });
    }

    let Some((map, width, height)) = map else {
        return Err(format_err(1, "scenario has no problems"));
    };
    Ok(Scenario {
        map: PathBuf::from(map),
        width,
        height,
        instances,
    })
}

/// Read a scenario file, resolving its map against the scenario's directory
/// when the map exists there.
pub fn load_scenario(path: &Path) -> Result<Scenario, MapError> {
    let mut scenario = read_scenario(BufReader::new(File::open(path)?))?;
    if let Some(dir) = path.parent() {
        let beside = dir.join(&scenario.map);
        if beside.try_exists()? {
            scenario.map = beside;
        }
    }
    Ok(scenario)
}

/// Read a map file.
pub fn load_map(path: &Path) -> Result<Grid<i32>, MapError> {
    read_map(BufReader::new(File::open(path)?))
}

fn field(line: usize, text: &str) -> Result<(String, String), MapError> {
    let mut tokens = text.split_whitespace();
    let (Some(key), Some(value), None) = (tokens.next(), tokens.next(), tokens.next()) else {
        return Err(format_err(line, "expected exactly two fields"));
    };
    Ok((key.to_owned(), value.to_owned()))
}

fn dimension(line: usize, name: &str, text: &str) -> Result<i32, MapError> {
    let (key, value) = field(line, text)?;
    if key != name {
        return Err(format_err(line, format!("expected {name}")));
    }
    value
        .parse()
        .ok()
        .filter(|&v: &i32| v >= 0)
        .ok_or_else(|| format_err(line, format!("invalid {name}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAP: &str = "type octile\nheight 3\nwidth 4\nmap\n..@.\n.TG.\nS..W\n";

    #[test]
    fn reads_octile_map() {
        let grid = read_map(MAP.as_bytes()).unwrap();
        assert_eq!((grid.width(), grid.height()), (4, 3));
        let rows: Vec<_> = grid.rows().collect();
        assert_eq!(rows, [&[1, 1, 0, 1][..], &[1, 0, 1, 1][..], &[1, 1, 1, 0][..]]);
    }

    #[test]
    fn rejects_truncated_map() {
        let err = read_map("type octile\nheight 3\nwidth 4\nmap\n....\n".as_bytes()).unwrap_err();
        assert!(matches!(err, MapError::Format { line: 6, .. }), "{err}");

        let err = read_map("type hex\n".as_bytes()).unwrap_err();
        assert!(matches!(err, MapError::Format { line: 1, .. }));
    }

    #[test]
    fn reads_scenario() {
        let text = "version 1\n\
                    0\tarena.map\t4\t3\t0\t0\t3\t0\t3.41421356\n\
                    1\tarena.map\t4\t3\t0\t2\t2\t1\t2.41421356\n";
        let scenario = read_scenario(text.as_bytes()).unwrap();
        assert_eq!(scenario.map, PathBuf::from("arena.map"));
        assert_eq!((scenario.width, scenario.height), (4, 3));
        assert_eq!(scenario.instances.len(), 2);
        assert_eq!(scenario.instances[1].start, Point::new(0, 2));
        assert_eq!(scenario.instances[1].goal, Point::new(2, 1));
        assert_eq!(scenario.instances[1].bucket, 1);
    }

    #[test]
    fn rejects_inconsistent_scenario() {
        let text = "version 1\n0 a.map 4 3 0 0 1 1 1.4\n0 b.map 4 3 0 0 1 1 1.4\n";
        let err = read_scenario(text.as_bytes()).unwrap_err();
        assert!(matches!(err, MapError::Format { line: 3, .. }));

        let err = read_scenario("version 2\n".as_bytes()).unwrap_err();
        assert!(matches!(err, MapError::Format { line: 1, .. }));
    }
}
