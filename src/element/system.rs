use crate::element::{ElementError, FiniteElement, PolynomialSpace};
use crate::nalgebra::{Point, SMatrix, SVector};
use crate::Real;
use itertools::Itertools;
use std::fmt;
use std::fmt::Debug;

/// A vector-valued element composed of copies of other elements.
///
/// Degrees of freedom are blocked: all degrees of freedom of the first copy of the first base
/// element come first, then those of its second copy, and so on. Components are numbered in
/// the same order.
pub struct FeSystem<T: Real, const D: usize> {
    base_elements: Vec<(Box<dyn FiniteElement<T, D>>, usize)>,
}

impl<T: Real, const D: usize> Debug for FeSystem<T, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeSystem")
            .field("name", &self.name())
            .finish()
    }
}

impl<T: Real, const D: usize> FeSystem<T, D> {
    pub fn builder() -> FeSystemBuilder<T, D> {
        FeSystemBuilder {
            base_elements: Vec::new(),
        }
    }

    /// Iterates over each copy of each base element, together with the offsets of its first
    /// degree of freedom and first component.
    fn copies(&self) -> impl Iterator<Item = (&dyn FiniteElement<T, D>, usize, usize)> {
        self.base_elements
            .iter()
            .flat_map(|(element, multiplicity)| std::iter::repeat(element.as_ref()).take(*multiplicity))
            .scan((0, 0), |(dof_offset, component_offset), element| {
                let item = (element, *dof_offset, *component_offset);
                *dof_offset += element.dofs_per_cell();
                *component_offset += element.num_components();
                Some(item)
            })
    }

    /// Finds the copy of a base element that shape function `i` belongs to, along with the
    /// index of the function within that copy and the component offset of the copy.
    fn locate(&self, i: usize) -> (&dyn FiniteElement<T, D>, usize, usize) {
        self.copies()
            .find(|(element, dof_offset, _)| i < dof_offset + element.dofs_per_cell())
            .map(|(element, dof_offset, component_offset)| (element, i - dof_offset, component_offset))
            .expect("Shape function index out of bounds")
    }
}

/// Builder for [`FeSystem`].
pub struct FeSystemBuilder<T: Real, const D: usize> {
    base_elements: Vec<(Box<dyn FiniteElement<T, D>>, usize)>,
}

impl<T: Real, const D: usize> FeSystemBuilder<T, D> {
    /// Adds `multiplicity` copies of the given element.
    pub fn with_base_element(mut self, element: impl FiniteElement<T, D> + 'static, multiplicity: usize) -> Self {
        let element: Box<dyn FiniteElement<T, D>> = Box::new(element);
        self.base_elements.push((element, multiplicity));
        self
    }

    pub fn build(self) -> Result<FeSystem<T, D>, ElementError> {
        if self.base_elements.is_empty() {
            return Err(ElementError::EmptySystem);
        }
        if let Some(base_element) = self
            .base_elements
            .iter()
            .position(|(_, multiplicity)| *multiplicity == 0)
        {
            return Err(ElementError::ZeroMultiplicity { base_element });
        }
        Ok(FeSystem {
            base_elements: self.base_elements,
        })
    }
}

impl<T: Real, const D: usize> FiniteElement<T, D> for FeSystem<T, D> {
    fn name(&self) -> String {
        let bases = self
            .base_elements
            .iter()
            .map(|(element, multiplicity)| match multiplicity {
                1 => element.name(),
                m => format!("{}^{m}", element.name()),
            })
            .join("-");
        format!("FESystem<{D}>[{bases}]")
    }

    fn degree(&self) -> usize {
        self.base_elements
            .iter()
            .map(|(element, _)| element.degree())
            .max()
            .unwrap_or(0)
    }

    fn num_components(&self) -> usize {
        self.base_elements
            .iter()
            .map(|(element, multiplicity)| multiplicity * element.num_components())
            .sum()
    }

    fn dofs_per_cell(&self) -> usize {
        self.base_elements
            .iter()
            .map(|(element, multiplicity)| multiplicity * element.dofs_per_cell())
            .sum()
    }

    fn num_base_elements(&self) -> usize {
        self.base_elements.len()
    }

    fn base_element(&self, index: usize) -> Option<&dyn FiniteElement<T, D>> {
        self.base_elements
            .get(index)
            .map(|(element, _)| element.as_ref())
    }

    fn element_multiplicity(&self, index: usize) -> usize {
        self.base_elements
            .get(index)
            .map(|(_, multiplicity)| *multiplicity)
            .unwrap_or(0)
    }

    fn polynomial_space(&self) -> PolynomialSpace<'_, T> {
        PolynomialSpace::Composite
    }

    fn system_to_component_index(&self, i: usize) -> (usize, usize) {
        let (element, local_index, component_offset) = self.locate(i);
        let (component, index) = element.system_to_component_index(local_index);
        (component_offset + component, index)
    }

    fn shape_value(&self, i: usize, point: &Point<T, D>) -> T {
        let (element, local_index, _) = self.locate(i);
        element.shape_value(local_index, point)
    }

    fn shape_gradient(&self, i: usize, point: &Point<T, D>) -> SVector<T, D> {
        let (element, local_index, _) = self.locate(i);
        element.shape_gradient(local_index, point)
    }

    fn shape_hessian(&self, i: usize, point: &Point<T, D>) -> SMatrix<T, D, D> {
        let (element, local_index, _) = self.locate(i);
        element.shape_hessian(local_index, point)
    }
}
