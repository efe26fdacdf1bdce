/// Triangle-local hit weights, valid when `u, v >= 0` and `u + v <= 1`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Barycentric {
    pub u: f64,
    pub v: f64,
}

/// Raw result of a primitive test: the ray parameter of the hit.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Hit {
    pub t: f64,
    pub barycentric: Option<Barycentric>,
}

impl Hit {
    #[inline]
    pub fn at(t: f64) -> Self {
        Self { t, barycentric: None }
    }
}

/// A hit resolved against a model, i.e. with its material attached.
#[derive(Copy, Clone, Debug)]
pub struct Intersection {
    pub t: f64,
    /// Index into the world's materials.
    pub material: usize,
    /// Set for triangle hits.
    pub barycentric: Option<Barycentric>,
}

impl Intersection {
    pub fn new(hit: Hit, material: usize) -> Self {
        Self {
            t: hit.t,
            material,
            barycentric: hit.barycentric,
        }
    }
}
