//! Classification of the tensor-product structure of finite element shape functions.
//!
//! Sum-factorized evaluation of finite element functions on tensor-product cells only needs
//! the one-dimensional shape functions tabulated at the one-dimensional quadrature points.
//! Depending on how these functions behave under reflection of the unit interval and on how
//! the quadrature points relate to the support points, cheaper evaluation kernels apply.
//! [`ShapeInfo`] tabulates the one-dimensional data for a base element and detects which
//! [`ElementType`] the combination of element and quadrature belongs to.
use crate::element::{FiniteElement, PolynomialSpace};
use crate::nalgebra::{DMatrix, DVector};
use crate::quadrature::{coordinates_1d, Quadrature1d};
use crate::Real;
use log::{debug, warn};
use numeric_literals::replace_float_literals;
use std::fmt;
use std::fmt::Display;

/// The tensor-product structure of an element evaluated with a given quadrature.
///
/// The numeric codes returned by [`ElementType::code`] are stable and are the values written
/// to diagnostic logs.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ElementType {
    /// Symmetric tensor-product shape functions whose values at the quadrature points form
    /// the identity matrix, i.e. the support points coincide with the quadrature points.
    TensorSymmetricCollocation = 0,
    /// Symmetric tensor-product shape functions where only one function is nonzero on a face
    /// and only two functions have a nonzero derivative on a face.
    TensorSymmetricHermite = 1,
    /// Tensor-product shape functions which are symmetric under reflection of the unit
    /// interval, evaluated with a symmetric quadrature.
    TensorSymmetric = 2,
    /// Tensor-product shape functions without further structure.
    TensorGeneral = 3,
    /// Complete polynomial space of some total degree, embedded in a tensor product.
    TruncatedTensor = 4,
    /// Symmetric tensor-product shape functions plus one discontinuous constant function.
    TensorSymmetricPlusDg0 = 5,
    /// The element has no degrees of freedom.
    TensorNone = 6,
}

impl ElementType {
    /// The numeric code of the element type.
    pub fn code(self) -> u32 {
        self as u32
    }

    /// Returns true if the type implies symmetric one-dimensional shape functions.
    pub fn is_symmetric(self) -> bool {
        matches!(
            self,
            Self::TensorSymmetricCollocation
                | Self::TensorSymmetricHermite
                | Self::TensorSymmetric
                | Self::TensorSymmetricPlusDg0
        )
    }
}

impl Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::TensorSymmetricCollocation => "tensor_symmetric_collocation",
            Self::TensorSymmetricHermite => "tensor_symmetric_hermite",
            Self::TensorSymmetric => "tensor_symmetric",
            Self::TensorGeneral => "tensor_general",
            Self::TruncatedTensor => "truncated_tensor",
            Self::TensorSymmetricPlusDg0 => "tensor_symmetric_plus_dg0",
            Self::TensorNone => "tensor_none",
        };
        write!(f, "{name}")
    }
}

/// Settings for the structure detection in [`ShapeInfo`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ShapeInfoSettings<T> {
    /// Tolerance used when comparing tabulated shape data.
    ///
    /// Symmetry comparisons scale the tolerance by the largest magnitude found in the
    /// compared table (but never by less than one), so that high-degree bases with large
    /// derivatives are not rejected because of round-off.
    pub zero_tolerance: T,
}

impl<T: Real> Default for ShapeInfoSettings<T> {
    fn default() -> Self {
        Self {
            zero_tolerance: T::default_epsilon() * T::from_f64(1e5).expect("Literal must fit in T"),
        }
    }
}

/// Errors returned when tabulating shape data.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ShapeInfoError {
    /// The requested base element does not exist.
    BaseElementOutOfRange { index: usize, num_base_elements: usize },
    /// Shape data can only be tabulated for scalar base elements.
    NotScalar { name: String, num_components: usize },
    /// The base element is not built from a one-dimensional basis.
    ///
    /// This includes systems used as base elements of other systems, even when they have a
    /// single component, such as `FESystem[FE_Q^1]`. Nested systems are not flattened.
    UnsupportedElement { name: String },
    /// The quadrature rule has no points.
    EmptyQuadrature,
}

impl Display for ShapeInfoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BaseElementOutOfRange {
                index,
                num_base_elements,
            } => write!(
                f,
                "Base element index {index} is out of range for an element with {num_base_elements} base elements"
            ),
            Self::NotScalar { name, num_components } => write!(
                f,
                "Base element {name} has {num_components} components, but only scalar base elements are supported"
            ),
            Self::UnsupportedElement { name } => {
                write!(f, "Element {name} is not built from a one-dimensional polynomial basis")
            }
            Self::EmptyQuadrature => write!(f, "The quadrature rule has no points"),
        }
    }
}

impl std::error::Error for ShapeInfoError {}

/// One-dimensional shape data at one end of the unit interval.
///
/// Entry `i` of each vector belongs to one-dimensional shape function `i`.
#[derive(Debug, Clone, PartialEq)]
pub struct FaceShapeData<T: Real> {
    pub values: DVector<T>,
    pub gradients: DVector<T>,
    pub hessians: DVector<T>,
}

impl<T: Real> FaceShapeData<T> {
    fn tabulate(basis: Option<&dyn crate::polynomials::Basis1d<T>>, n_dofs_1d: usize, x: T) -> Self {
        let mut data = Self {
            values: DVector::zeros(n_dofs_1d),
            gradients: DVector::zeros(n_dofs_1d),
            hessians: DVector::zeros(n_dofs_1d),
        };
        if let Some(basis) = basis {
            for i in 0..n_dofs_1d {
                let [value, gradient, hessian] = basis.evaluate(i, x);
                data.values[i] = value;
                data.gradients[i] = gradient;
                data.hessians[i] = hessian;
            }
        }
        data
    }
}

/// Tabulated one-dimensional shape data of a base element and its detected structure.
///
/// Tables are stored with one row per one-dimensional shape function and one column per
/// one-dimensional quadrature point.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeInfo<T: Real> {
    element_type: ElementType,
    shape_values: DMatrix<T>,
    shape_gradients: DMatrix<T>,
    shape_hessians: DMatrix<T>,
    shape_values_eo: DMatrix<T>,
    shape_gradients_eo: DMatrix<T>,
    shape_hessians_eo: DMatrix<T>,
    shape_data_on_face: [FaceShapeData<T>; 2],
    quadrature_points_1d: Vec<T>,
    quadrature_weights_1d: Vec<T>,
    lexicographic_numbering: Vec<usize>,
    fe_degree: usize,
    n_dimensions: usize,
    n_components: usize,
    n_q_points_1d: usize,
    n_q_points: usize,
    n_q_points_face: usize,
    dofs_per_component_on_cell: usize,
    dofs_per_component_on_face: usize,
}

impl<T: Real> ShapeInfo<T> {
    /// Tabulates shape data for base element `base_element` of `fe` with default settings.
    pub fn new<const D: usize, F>(
        quadrature: &impl Quadrature1d<T>,
        fe: &F,
        base_element: usize,
    ) -> Result<Self, ShapeInfoError>
    where
        F: FiniteElement<T, D> + ?Sized,
    {
        Self::with_settings::<D, F>(quadrature, fe, base_element, ShapeInfoSettings::default())
    }

    /// Tabulates shape data for base element `base_element` of `fe`.
    pub fn with_settings<const D: usize, F>(
        quadrature: &impl Quadrature1d<T>,
        fe: &F,
        base_element: usize,
        settings: ShapeInfoSettings<T>,
    ) -> Result<Self, ShapeInfoError>
    where
        F: FiniteElement<T, D> + ?Sized,
    {
        let base = fe
            .base_element(base_element)
            .ok_or(ShapeInfoError::BaseElementOutOfRange {
                index: base_element,
                num_base_elements: fe.num_base_elements(),
            })?;
        if base.num_components() != 1 {
            return Err(ShapeInfoError::NotScalar {
                name: base.name(),
                num_components: base.num_components(),
            });
        }
        if quadrature.is_empty() {
            return Err(ShapeInfoError::EmptyQuadrature);
        }
        if quadrature.weights().iter().any(|w| !w.is_finite()) {
            warn!("Quadrature rule used for {} has non-finite weights", base.name());
        }

        let space = base.polynomial_space();
        let element_type = match space {
            PolynomialSpace::TensorProduct(_) => ElementType::TensorGeneral,
            PolynomialSpace::TensorProductPlusConstant(_) => ElementType::TensorSymmetricPlusDg0,
            PolynomialSpace::Truncated(_) => ElementType::TruncatedTensor,
            PolynomialSpace::Empty => ElementType::TensorNone,
            PolynomialSpace::Composite => return Err(ShapeInfoError::UnsupportedElement { name: base.name() }),
        };
        let basis = space.basis_1d();
        let n_dofs_1d = basis.map_or(0, |basis| basis.num_functions());

        let points = coordinates_1d(quadrature);
        let n_q_points_1d = points.len();
        let mut shape_values = DMatrix::zeros(n_dofs_1d, n_q_points_1d);
        let mut shape_gradients = DMatrix::zeros(n_dofs_1d, n_q_points_1d);
        let mut shape_hessians = DMatrix::zeros(n_dofs_1d, n_q_points_1d);
        if let Some(basis) = basis {
            for i in 0..n_dofs_1d {
                for (q, &x) in points.iter().enumerate() {
                    let [value, gradient, hessian] = basis.evaluate(i, x);
                    shape_values[(i, q)] = value;
                    shape_gradients[(i, q)] = gradient;
                    shape_hessians[(i, q)] = hessian;
                }
            }
        }
        let shape_data_on_face = [
            FaceShapeData::tabulate(basis, n_dofs_1d, T::zero()),
            FaceShapeData::tabulate(basis, n_dofs_1d, T::one()),
        ];

        let dofs_per_component_on_cell = space.dimension(D).unwrap_or(0);
        let dofs_per_component_on_face = match space {
            PolynomialSpace::TensorProductPlusConstant(basis) => basis.num_functions().pow(D as u32 - 1),
            _ => space.dimension(D - 1).unwrap_or(0),
        };
        let scalar_numbering: Vec<usize> = (0..dofs_per_component_on_cell).collect();

        let mut shape_info = Self {
            element_type,
            shape_values,
            shape_gradients,
            shape_hessians,
            shape_values_eo: DMatrix::zeros(0, 0),
            shape_gradients_eo: DMatrix::zeros(0, 0),
            shape_hessians_eo: DMatrix::zeros(0, 0),
            shape_data_on_face,
            quadrature_points_1d: points,
            quadrature_weights_1d: quadrature.weights().to_vec(),
            lexicographic_numbering: lexicographic_numbering(fe, base_element, &scalar_numbering),
            fe_degree: base.degree(),
            n_dimensions: D,
            n_components: fe.num_components(),
            n_q_points_1d,
            n_q_points: n_q_points_1d.pow(D as u32),
            n_q_points_face: n_q_points_1d.pow(D as u32 - 1),
            dofs_per_component_on_cell,
            dofs_per_component_on_face,
        };

        let tolerance = settings.zero_tolerance;
        match element_type {
            ElementType::TensorGeneral => {
                if shape_info.check_1d_shapes_symmetric(tolerance) {
                    shape_info.element_type = if shape_info.check_1d_shapes_collocation(tolerance) {
                        ElementType::TensorSymmetricCollocation
                    } else if n_dofs_1d > 3 && shape_info.check_1d_shapes_hermite(tolerance) {
                        ElementType::TensorSymmetricHermite
                    } else {
                        ElementType::TensorSymmetric
                    };
                }
            }
            ElementType::TensorSymmetricPlusDg0 => {
                // The type is known up front, but the even-odd tables still need to be built
                shape_info.check_1d_shapes_symmetric(tolerance);
            }
            _ => {}
        }

        debug!(
            "Detected {} (code {}) for {} with {} quadrature points per direction",
            shape_info.element_type,
            shape_info.element_type.code(),
            base.name(),
            n_q_points_1d
        );
        Ok(shape_info)
    }

    /// Checks whether the one-dimensional shape functions are symmetric under reflection of
    /// the unit interval, and builds the even-odd tables if they are.
    ///
    /// Values and second derivatives must be symmetric and first derivatives antisymmetric:
    /// with `n` functions and `m` points, entry `(i, q)` must match entry
    /// `(n - 1 - i, m - 1 - q)`. If both `n` and `m` are odd, the middle function must be one
    /// and the others zero at the middle point, and the middle function must have zero slope
    /// there.
    #[replace_float_literals(T::from_f64(literal).expect("Literal must fit in T"))]
    fn check_1d_shapes_symmetric(&mut self, zero_tolerance: T) -> bool {
        if self.dofs_per_component_on_cell == 0 {
            return false;
        }
        let n = self.shape_values.nrows();
        let m = self.n_q_points_1d;

        let values_tolerance = zero_tolerance * scale(&self.shape_values);
        let gradients_tolerance = zero_tolerance * scale(&self.shape_gradients);
        let hessians_tolerance = zero_tolerance * scale(&self.shape_hessians);

        for i in 0..(n + 1) / 2 {
            for q in 0..m {
                let mirror = (n - 1 - i, m - 1 - q);
                if (self.shape_values[(i, q)] - self.shape_values[mirror]).abs() > values_tolerance {
                    debug!("Shape values are not symmetric for function {i} at point {q}");
                    return false;
                }
                if (self.shape_gradients[(i, q)] + self.shape_gradients[mirror]).abs() > gradients_tolerance {
                    debug!("Shape gradients are not antisymmetric for function {i} at point {q}");
                    return false;
                }
                if (self.shape_hessians[(i, q)] - self.shape_hessians[mirror]).abs() > hessians_tolerance {
                    debug!("Shape hessians are not symmetric for function {i} at point {q}");
                    return false;
                }
            }
        }

        if n % 2 == 1 && m % 2 == 1 {
            let (middle_function, middle_point) = (n / 2, m / 2);
            for i in 0..middle_function {
                if self.shape_values[(i, middle_point)].abs() > values_tolerance {
                    debug!("Shape function {i} does not vanish at the middle point");
                    return false;
                }
            }
            if (self.shape_values[(middle_function, middle_point)] - 1.0).abs() > values_tolerance {
                debug!("Middle shape function is not one at the middle point");
                return false;
            }
            if self.shape_gradients[(middle_function, middle_point)].abs() > gradients_tolerance {
                debug!("Middle shape function has nonzero slope at the middle point");
                return false;
            }
        }

        self.shape_values_eo = even_odd(&self.shape_values);
        self.shape_gradients_eo = even_odd(&self.shape_gradients);
        self.shape_hessians_eo = even_odd(&self.shape_hessians);
        true
    }

    /// Checks whether the shape values at the quadrature points form the identity matrix.
    #[replace_float_literals(T::from_f64(literal).expect("Literal must fit in T"))]
    fn check_1d_shapes_collocation(&self, zero_tolerance: T) -> bool {
        if self.dofs_per_component_on_cell != self.n_q_points || self.shape_values.nrows() != self.n_q_points_1d {
            return false;
        }
        let n = self.n_q_points_1d;
        (0..n).all(|i| {
            (0..n).all(|j| {
                let expected = if i == j { 1.0 } else { 0.0 };
                (self.shape_values[(i, j)] - expected).abs() <= zero_tolerance
            })
        })
    }

    /// Checks the Hermite-like face conditions at `x = 0`: all functions but the first vanish
    /// and all functions but the first two have zero slope.
    fn check_1d_shapes_hermite(&self, zero_tolerance: T) -> bool {
        let face = &self.shape_data_on_face[0];
        let values_tolerance = zero_tolerance * scale_vector(&face.values);
        let gradients_tolerance = zero_tolerance * scale_vector(&face.gradients);
        let values_vanish = face
            .values
            .iter()
            .skip(1)
            .all(|v| v.abs() <= values_tolerance);
        let gradients_vanish = face
            .gradients
            .iter()
            .skip(2)
            .all(|g| g.abs() <= gradients_tolerance);
        values_vanish && gradients_vanish
    }

    pub fn element_type(&self) -> ElementType {
        self.element_type
    }

    /// Values of the one-dimensional shape functions (rows) at the quadrature points (columns).
    pub fn shape_values(&self) -> &DMatrix<T> {
        &self.shape_values
    }

    pub fn shape_gradients(&self) -> &DMatrix<T> {
        &self.shape_gradients
    }

    pub fn shape_hessians(&self) -> &DMatrix<T> {
        &self.shape_hessians
    }

    /// Even-odd decomposition of the shape values.
    ///
    /// Only available (non-empty) when the shape functions are symmetric. The table has
    /// `(n_q_points_1d + 1) / 2` columns. Row `i` of the first half holds the symmetric part
    /// `(v_i(x_q) + v_i(x_{m-1-q})) / 2` and row `degree - i` the antisymmetric part.
    pub fn shape_values_eo(&self) -> &DMatrix<T> {
        &self.shape_values_eo
    }

    pub fn shape_gradients_eo(&self) -> &DMatrix<T> {
        &self.shape_gradients_eo
    }

    pub fn shape_hessians_eo(&self) -> &DMatrix<T> {
        &self.shape_hessians_eo
    }

    /// Shape data at `x = 0` (index 0) and `x = 1` (index 1).
    pub fn shape_data_on_face(&self) -> &[FaceShapeData<T>; 2] {
        &self.shape_data_on_face
    }

    pub fn quadrature_points_1d(&self) -> &[T] {
        &self.quadrature_points_1d
    }

    pub fn quadrature_weights_1d(&self) -> &[T] {
        &self.quadrature_weights_1d
    }

    /// Degrees of freedom of all copies of the base element in lexicographic order, given as
    /// indices into the degrees of freedom of the full element.
    pub fn lexicographic_numbering(&self) -> &[usize] {
        &self.lexicographic_numbering
    }

    pub fn fe_degree(&self) -> usize {
        self.fe_degree
    }

    pub fn n_dimensions(&self) -> usize {
        self.n_dimensions
    }

    /// The number of components of the full element the base element belongs to.
    pub fn n_components(&self) -> usize {
        self.n_components
    }

    pub fn n_q_points_1d(&self) -> usize {
        self.n_q_points_1d
    }

    pub fn n_q_points(&self) -> usize {
        self.n_q_points
    }

    pub fn n_q_points_face(&self) -> usize {
        self.n_q_points_face
    }

    pub fn dofs_per_component_on_cell(&self) -> usize {
        self.dofs_per_component_on_cell
    }

    pub fn dofs_per_component_on_face(&self) -> usize {
        self.dofs_per_component_on_face
    }
}

/// The largest magnitude in the table, but at least one.
fn scale<T: Real>(table: &DMatrix<T>) -> T {
    table.iter().fold(T::one(), |max, x| max.max(x.abs()))
}

fn scale_vector<T: Real>(vector: &DVector<T>) -> T {
    vector.iter().fold(T::one(), |max, x| max.max(x.abs()))
}

/// Splits a symmetric table into its even and odd parts over the first half of the points.
#[replace_float_literals(T::from_f64(literal).expect("Literal must fit in T"))]
fn even_odd<T: Real>(table: &DMatrix<T>) -> DMatrix<T> {
    let n = table.nrows();
    let m = table.ncols();
    let stride = (m + 1) / 2;
    let mut result = DMatrix::zeros(n, stride);
    for i in 0..n / 2 {
        for q in 0..stride {
            let (a, b) = (table[(i, q)], table[(i, m - 1 - q)]);
            result[(i, q)] = 0.5 * (a + b);
            result[(n - 1 - i, q)] = 0.5 * (a - b);
        }
    }
    if n % 2 == 1 {
        for q in 0..stride {
            result[(n / 2, q)] = table[(n / 2, q)];
        }
    }
    result
}

/// Indices into the degrees of freedom of `fe` of all copies of base element `base_element`,
/// assuming degrees of freedom are blocked by base element and then by copy.
fn lexicographic_numbering<T, F, const D: usize>(fe: &F, base_element: usize, scalar_numbering: &[usize]) -> Vec<usize>
where
    T: Real,
    F: FiniteElement<T, D> + ?Sized,
{
    let dofs_of_base = |b: usize| fe.base_element(b).map_or(0, |base| base.dofs_per_cell());
    let offset: usize = (0..base_element)
        .map(|b| fe.element_multiplicity(b) * dofs_of_base(b))
        .sum();
    let dofs_per_copy = dofs_of_base(base_element);
    (0..fe.element_multiplicity(base_element))
        .flat_map(|copy| {
            scalar_numbering
                .iter()
                .map(move |&i| offset + copy * dofs_per_copy + i)
        })
        .collect()
}
