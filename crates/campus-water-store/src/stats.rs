use campus_water_model::QualityGrade;
use serde::Serialize;

/// Whole-number percentage, rounded half up; 0 when `whole` is 0.
#[must_use]
pub fn percent(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    let ratio = part as f64 * 100.0 / whole as f64;
    ratio.round() as u32
}

#[must_use]
pub(crate) fn mean(values: impl IntoIterator<Item = f64>) -> f64 {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0_usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

/// Sample counts per grade.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct QualityDistribution {
    pub excellent: usize,
    pub good: usize,
    pub acceptable: usize,
    pub poor: usize,
    pub unacceptable: usize,
}

impl QualityDistribution {
    pub fn from_grades(grades: impl IntoIterator<Item = QualityGrade>) -> Self {
        let mut out = Self::default();
        for grade in grades {
            out.record(grade);
        }
        out
    }

    pub fn record(&mut self, grade: QualityGrade) {
        let slot = match grade {
            QualityGrade::Excellent => &mut self.excellent,
            QualityGrade::Good => &mut self.good,
            QualityGrade::Acceptable => &mut self.acceptable,
            QualityGrade::Poor => &mut self.poor,
            QualityGrade::Unacceptable => &mut self.unacceptable,
        };
        *slot += 1;
    }

    #[must_use]
    pub const fn count(&self, grade: QualityGrade) -> usize {
        match grade {
            QualityGrade::Excellent => self.excellent,
            QualityGrade::Good => self.good,
            QualityGrade::Acceptable => self.acceptable,
            QualityGrade::Poor => self.poor,
            QualityGrade::Unacceptable => self.unacceptable,
        }
    }

    #[must_use]
    pub const fn total(&self) -> usize {
        self.excellent + self.good + self.acceptable + self.poor + self.unacceptable
    }
}
