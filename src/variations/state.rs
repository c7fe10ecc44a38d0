/// Per-call evaluation state shared by every variation slot of one xform.
///
/// `tx`/`ty` hold the affine-transformed input point; kernels accumulate
/// their weighted output into `p0`/`p1`. Radial quantities that several
/// kernels share (squared radius, radius, the two polar angles and the
/// normalized direction) are computed at most once per call and cached.
/// Caching is a pure factoring of per-call-invariant subexpressions and
/// never changes results.
#[derive(Debug)]
pub struct VarState {
    pub tx: f64,
    pub ty: f64,
    pub p0: f64,
    pub p1: f64,

    sumsq: Option<f64>,
    r: Option<f64>,
    atan: Option<f64>,
    sina: Option<f64>,
    cosa: Option<f64>,
    atanyx: Option<f64>,
}

impl VarState {
    pub fn new(tx: f64, ty: f64) -> Self {
        Self {
            tx,
            ty,
            p0: 0.0,
            p1: 0.0,
            sumsq: None,
            r: None,
            atan: None,
            sina: None,
            cosa: None,
            atanyx: None,
        }
    }

    /// tx^2 + ty^2
    pub fn sumsq(&mut self) -> f64 {
        match self.sumsq {
            Some(v) => v,
            None => {
                let v = self.tx * self.tx + self.ty * self.ty;
                self.sumsq = Some(v);
                v
            }
        }
    }

    /// Radius sqrt(tx^2 + ty^2).
    pub fn r(&mut self) -> f64 {
        match self.r {
            Some(v) => v,
            None => {
                let v = self.sumsq().sqrt();
                self.r = Some(v);
                v
            }
        }
    }

    /// atan2(tx, ty) -- the flame convention with arguments swapped.
    pub fn atan(&mut self) -> f64 {
        match self.atan {
            Some(v) => v,
            None => {
                let v = self.tx.atan2(self.ty);
                self.atan = Some(v);
                v
            }
        }
    }

    /// atan2(ty, tx) -- the conventional polar angle.
    pub fn atanyx(&mut self) -> f64 {
        match self.atanyx {
            Some(v) => v,
            None => {
                let v = self.ty.atan2(self.tx);
                self.atanyx = Some(v);
                v
            }
        }
    }

    /// tx / r
    pub fn sina(&mut self) -> f64 {
        match self.sina {
            Some(v) => v,
            None => {
                let v = self.tx / self.r();
                self.sina = Some(v);
                v
            }
        }
    }

    /// ty / r
    pub fn cosa(&mut self) -> f64 {
        match self.cosa {
            Some(v) => v,
            None => {
                let v = self.ty / self.r();
                self.cosa = Some(v);
                v
            }
        }
    }
}
