//! Projection state carried from one period to the next

use ndarray::{s, Array1, Array2, Axis};

use crate::data::CHILD_AGES;

/// Rate arrays held fixed for the whole projection
#[derive(Debug, Clone)]
pub struct ProjectionRates {
    /// S x J one-period survival; the last row is 0
    pub survival: Array2<f64>,

    /// (S-1) x J immigration applied when moving from cohort s to s + 1
    pub immigration: Array2<f64>,

    /// S x J births per person per period
    pub fertility: Array2<f64>,

    /// One-year survival for ages 0..=14
    pub child_survival: Array1<f64>,

    /// One-year immigration for ages 0..=13
    pub child_immigration: Array1<f64>,
}

impl ProjectionRates {
    /// Newborns per ability type implied by a cohort distribution
    pub fn births(&self, cohorts: &Array2<f64>) -> Array1<f64> {
        (cohorts * &self.fertility).sum_axis(Axis(0))
    }
}

/// State of the population at one period
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionState {
    /// Current period (0 = observed initial period)
    pub period: usize,

    /// S x J population share by cohort and ability type
    pub cohorts: Array2<f64>,

    /// 15 x J projected pre-adults by single year of age (0..=14)
    pub children: Array2<f64>,
}

impl ProjectionState {
    /// Start from the observed cohorts and back-fill the children as if the
    /// system had been running steadily: each single-year class holds the
    /// current births discounted by the survival and immigration of the
    /// years it has already lived.
    pub fn initial(cohorts: Array2<f64>, rates: &ProjectionRates) -> Self {
        let births = rates.births(&cohorts);
        let mut children = Array2::zeros((CHILD_AGES, cohorts.ncols()));

        for age in 0..CHILD_AGES {
            let survived: f64 = rates.child_survival.iter().take(age).product();
            let migrated: f64 = rates.child_immigration.iter().take(age).product();
            children.row_mut(age).assign(&(&births * survived * migrated));
        }

        Self {
            period: 0,
            cohorts,
            children,
        }
    }

    /// Advance one period
    ///
    /// The oldest child class enters cohort 0, every cohort but the last moves
    /// up one step, children age one year, and births are computed from the
    /// updated cohorts.
    pub fn advance(&mut self, rates: &ProjectionRates) {
        let cohorts = self.cohorts.nrows();
        let oldest_child = CHILD_AGES - 1;

        let mut next = Array2::zeros(self.cohorts.raw_dim());
        let graduates = &self.children.row(oldest_child) * rates.child_survival[oldest_child];
        next.row_mut(0)
            .assign(&(&graduates * &rates.immigration.row(0)));
        let aged = &self.cohorts.slice(s![..cohorts - 1, ..])
            * &rates.survival.slice(s![..cohorts - 1, ..])
            * &rates.immigration;
        next.slice_mut(s![1.., ..]).assign(&aged);

        let mut children = Array2::zeros(self.children.raw_dim());
        for age in 1..CHILD_AGES {
            let aged_child = &self.children.row(age - 1) * rates.child_survival[age - 1]
                * rates.child_immigration[age - 1];
            children.row_mut(age).assign(&aged_child);
        }
        children.row_mut(0).assign(&rates.births(&next));

        self.cohorts = next;
        self.children = children;
        self.period += 1;
    }
}
