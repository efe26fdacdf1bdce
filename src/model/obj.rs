//! Wavefront OBJ loader.
//!
//! Only the subset needed to build triangles is understood:
//!
//! - `v x y z`: vertex position
//! - `vt u v [w]` and `vn x y z`: validated, then discarded
//! - `f a/b/c a/b/c a/b/c`: exactly three 1-based `vertex/texcoord/normal`
//!   triples
//!
//! Blank lines and `#` comments are skipped, as are lines with any other tag.
//! Anything malformed aborts the whole load with the offending line number.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use log::debug;
use thiserror::Error;

use crate::collection::Collection;
use crate::geometry::Triangle;
use crate::vec3::Vec3;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },
}

pub type ParseResult<T> = Result<T, ParseError>;

#[derive(Debug, Default)]
struct Parser {
    positions: Collection<Vec3<f64>>,
    texcoords: usize,
    normals: usize,
    /// 0-based position indices of each face.
    faces: Collection<[usize; 3]>,
}

pub fn load<P: AsRef<Path>>(path: P) -> ParseResult<Collection<Triangle>> {
    let content = fs::read_to_string(path)?;
    parse(&content)
}

/// Parses OBJ source into triangles, in face order.
pub fn parse(content: &str) -> ParseResult<Collection<Triangle>> {
    let mut parser = Parser::default();

    for (idx, line) in content.lines().enumerate() {
        parser
            .line(line)
            .map_err(|message| ParseError::Parse { line: idx + 1, message })?;
    }

    Ok(parser.triangles())
}

impl Parser {
    fn line(&mut self, line: &str) -> Result<(), String> {
        let mut tokens = line.split_whitespace();

        let tag = match tokens.next() {
            Some(tag) if !tag.starts_with('#') => tag,
            _ => return Ok(()),
        };
        let args: Vec<&str> = tokens.collect();

        match tag {
            "v" => {
                let [x, y, z] = floats::<3>(tag, &args)?;
                self.positions.push(Vec3::new(x, y, z));
            }
            "vt" => {
                if args.len() != 2 && args.len() != 3 {
                    return Err(format!("`vt` expects 2 or 3 values, got {}", args.len()));
                }
                for arg in &args {
                    float(arg)?;
                }
                self.texcoords += 1;
            }
            "vn" => {
                floats::<3>(tag, &args)?;
                self.normals += 1;
            }
            "f" => {
                if args.len() != 3 {
                    return Err(format!("`f` expects 3 vertices, got {}", args.len()));
                }
                let face = [self.corner(args[0])?, self.corner(args[1])?, self.corner(args[2])?];
                self.faces.push(face);
            }
            _ => debug!("skipping unsupported OBJ statement `{}`", tag),
        }

        Ok(())
    }

    /// Resolves one `v/vt/vn` triple to its position index.
    fn corner(&self, token: &str) -> Result<usize, String> {
        let parts: Vec<&str> = token.split('/').collect();
        if parts.len() != 3 {
            return Err(format!("face vertex `{}` is not a `v/vt/vn` triple", token));
        }

        resolve(parts[1], self.texcoords, "texcoord")?;
        resolve(parts[2], self.normals, "normal")?;
        resolve(parts[0], self.positions.len(), "vertex")
    }

    fn triangles(&self) -> Collection<Triangle> {
        let at = |idx: &usize| self.positions[*idx];

        self.faces
            .iter()
            .map(|[a, b, c]| Triangle::new(at(a), at(b), at(c)))
            .collect()
    }
}

fn number<T: FromStr>(token: &str) -> Result<T, String> {
    token
        .parse()
        .map_err(|_| format!("invalid number `{}`", token))
}

/// Parses a coordinate, rejecting `nan` and infinities.
fn float(token: &str) -> Result<f64, String> {
    let value: f64 = number(token)?;

    if !value.is_finite() {
        return Err(format!("non-finite number `{}`", token));
    }
    Ok(value)
}

fn floats<const N: usize>(tag: &str, args: &[&str]) -> Result<[f64; N], String> {
    if args.len() != N {
        return Err(format!("`{}` expects {} values, got {}", tag, N, args.len()));
    }

    let mut out = [0.0; N];
    for (slot, arg) in out.iter_mut().zip(args) {
        *slot = float(arg)?;
    }
    Ok(out)
}

/// Converts a 1-based reference into a 0-based index below `count`.
fn resolve(token: &str, count: usize, what: &str) -> Result<usize, String> {
    let index: usize = number(token)?;

    if index == 0 || index > count {
        return Err(format!("{} index {} is out of range (1..={})", what, index, count));
    }
    Ok(index - 1)
}

#[cfg(test)]
const QUAD: &str = "\
# unit quad
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0

vt 0 0
vn 0 0 1
o quad
f 1/1/1 2/1/1 3/1/1
f 1/1/1 3/1/1 4/1/1
";

#[cfg(test)]
fn line_of(result: ParseResult<Collection<Triangle>>) -> usize {
    match result {
        Err(ParseError::Parse { line, .. }) => line,
        Err(err) => panic!("unexpected error: {}", err),
        Ok(..) => panic!("malformed input was accepted"),
    }
}

#[test]
fn parse_quad() {
    let triangles = parse(QUAD).unwrap();

    assert_eq!(2, triangles.len());
    assert_eq!(
        Triangle::new(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
        ),
        triangles[0]
    );
    assert_eq!(Vec3::new(0.0, 1.0, 0.0), triangles[1].c);
}

#[test]
fn faces_may_precede_unused_vertices() {
    let triangles = parse("v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0 0\nvn 0 0 1\nf 3/1/1 2/1/1 1/1/1\nv 9 9 9\n").unwrap();

    assert_eq!(1, triangles.len());
    assert_eq!(Vec3::new(0.0, 1.0, 0.0), triangles[0].a);
}

#[test]
fn out_of_range_vertex_is_rejected() {
    assert_eq!(6, line_of(parse("v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0 0\nvn 0 0 1\nf 1/1/1 2/1/1 4/1/1\n")));
    assert_eq!(6, line_of(parse("v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0 0\nvn 0 0 1\nf 0/1/1 2/1/1 3/1/1\n")));
}

#[test]
fn out_of_range_texcoord_is_rejected() {
    assert_eq!(5, line_of(parse("v 0 0 0\nv 1 0 0\nv 0 1 0\nvn 0 0 1\nf 1/1/1 2/1/1 3/1/1\n")));
}

#[test]
fn wrong_token_counts_are_rejected() {
    assert_eq!(1, line_of(parse("v 0 0\n")));
    assert_eq!(1, line_of(parse("v 0 0 0 1\n")));
    assert_eq!(2, line_of(parse("v 0 0 0\nvn 0 1\n")));
    assert_eq!(6, line_of(parse(&QUAD.replace("v 0 1 0\n", "v 0 1 0\nf 1/1/1 2/1/1\n"))));
    assert_eq!(12, line_of(parse(&format!("{}f 1/1/1 2/1/1 3/1/1 4/1/1\n", QUAD))));
}

#[test]
fn malformed_numbers_are_rejected() {
    assert_eq!(1, line_of(parse("v 0 zero 0\n")));
    assert_eq!(2, line_of(parse("vt 0 0\nvt 0 nan?\n")));
    assert_eq!(12, line_of(parse(&format!("{}f 1//1 2//1 3//1\n", QUAD))));
    assert_eq!(12, line_of(parse(&format!("{}f 1 2 3\n", QUAD))));
}

#[test]
fn non_finite_numbers_are_rejected() {
    assert_eq!(1, line_of(parse("v nan 0 0\n")));
    assert_eq!(1, line_of(parse("v nan inf -inf\nv 1 0 0\nv 0 1 0\nvt 0 0\nvn 0 0 1\nf 1/1/1 2/1/1 3/1/1\n")));
    assert_eq!(2, line_of(parse("v 0 0 0\nvn inf 0 0\n")));
    assert_eq!(2, line_of(parse("v 0 0 0\nvt 0 -inf\n")));
}

#[test]
fn empty_source_has_no_triangles() {
    assert!(parse("").unwrap().is_empty());
    assert!(parse("# nothing\n\n   \n").unwrap().is_empty());
}

#[test]
fn load_missing_file_is_io_error() {
    match load("/nonexistent/bray/model.obj") {
        Err(ParseError::Io(..)) => {}
        other => panic!("unexpected result: {:?}", other.map(|t| t.len())),
    }
}
