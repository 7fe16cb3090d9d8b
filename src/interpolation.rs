//! 표 데이터에 대한 1차원/2차원 선형 보간.
//!
//! 외삽은 하지 않는다. 표 범위를 벗어나면 유효 범위를 담은 오류를 돌려준다.

use std::cmp::Ordering;

/// 보간 시 발생 가능한 오류.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InterpolationError {
    /// 질의 값이 표 범위를 벗어남
    #[error("value {value} is outside the table range ({min}..{max})")]
    OutOfRange { value: f64, min: f64, max: f64 },
    /// 표가 비어 있음
    #[error("interpolation table is empty")]
    EmptyTable,
    /// 좌표축과 값의 길이가 다름
    #[error("length mismatch: axis has {axis} points, values have {values}")]
    LengthMismatch { axis: usize, values: usize },
    /// 좌표축이 오름차순이 아님
    #[error("axis is not sorted ascending at index {index}")]
    NotAscending { index: usize },
}

/// 축 위에서 질의 값을 감싸는 구간을 찾는다.
///
/// 반환값은 (하한 인덱스, 구간 내 비율)이다. 표본점과 정확히 일치하면 비율은 0이고
/// 인덱스는 그 표본점을 가리킨다.
fn locate(axis: &[f64], x: f64) -> Result<(usize, f64), InterpolationError> {
    let (first, last) = match (axis.first(), axis.last()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => return Err(InterpolationError::EmptyTable),
    };
    // NaN은 비교가 모두 false이므로 범위 검사에서 함께 걸러진다.
    if !(x >= first && x <= last) {
        return Err(InterpolationError::OutOfRange {
            value: x,
            min: first,
            max: last,
        });
    }
    if let Some(idx) = axis.iter().position(|&p| p == x) {
        return Ok((idx, 0.0));
    }
    for (i, pair) in axis.windows(2).enumerate() {
        let (a, b) = (pair[0], pair[1]);
        if x > a && x < b {
            return Ok((i, (x - a) / (b - a)));
        }
    }
    Err(InterpolationError::OutOfRange {
        value: x,
        min: first,
        max: last,
    })
}

pub(crate) fn check_axis(axis: &[f64]) -> Result<(), InterpolationError> {
    if axis.is_empty() {
        return Err(InterpolationError::EmptyTable);
    }
    for (i, pair) in axis.windows(2).enumerate() {
        // NaN은 어느 쪽과도 순서가 없으므로 함께 거부된다.
        if pair[1].partial_cmp(&pair[0]) != Some(Ordering::Greater) {
            return Err(InterpolationError::NotAscending { index: i + 1 });
        }
    }
    Ok(())
}

fn lerp(values: &[f64], idx: usize, ratio: f64) -> f64 {
    if ratio == 0.0 {
        values[idx]
    } else {
        values[idx] + ratio * (values[idx + 1] - values[idx])
    }
}

/// `xs`(오름차순)와 `ys`로 주어진 표에서 `x`의 값을 선형 보간한다.
///
/// `x`가 표본점과 일치하면 해당 `y`를 그대로 반환한다.
pub fn interpolate(xs: &[f64], ys: &[f64], x: f64) -> Result<f64, InterpolationError> {
    check_axis(xs)?;
    if xs.len() != ys.len() {
        return Err(InterpolationError::LengthMismatch {
            axis: xs.len(),
            values: ys.len(),
        });
    }
    let (idx, ratio) = locate(xs, x)?;
    Ok(lerp(ys, idx, ratio))
}

/// 2차원 격자에서 쌍선형 보간한다.
///
/// `xs`는 열 좌표, `ys`는 행 좌표이며 `zs[행][열]`로 값을 담는다.
pub fn interpolate_2d(
    xs: &[f64],
    ys: &[f64],
    zs: &[Vec<f64>],
    x: f64,
    y: f64,
) -> Result<f64, InterpolationError> {
    check_axis(xs)?;
    check_axis(ys)?;
    if zs.len() != ys.len() {
        return Err(InterpolationError::LengthMismatch {
            axis: ys.len(),
            values: zs.len(),
        });
    }
    if let Some(row) = zs.iter().find(|row| row.len() != xs.len()) {
        return Err(InterpolationError::LengthMismatch {
            axis: xs.len(),
            values: row.len(),
        });
    }

    let (ix, rx) = locate(xs, x)?;
    let (iy, ry) = locate(ys, y)?;

    let lower = lerp(&zs[iy], ix, rx);
    if ry == 0.0 {
        return Ok(lower);
    }
    let upper = lerp(&zs[iy + 1], ix, rx);
    Ok(lower + ry * (upper - lower))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn exact_sample_returns_sample_value() {
        let xs = [1.0, 2.0, 4.0];
        let ys = [10.0, 0.3, 7.7];
        assert_eq!(interpolate(&xs, &ys, 2.0).unwrap(), 0.3);
        assert_eq!(interpolate(&xs, &ys, 4.0).unwrap(), 7.7);
    }

    #[test]
    fn midpoint_is_linear() {
        let xs = [0.0, 10.0];
        let ys = [3.0, 1.0];
        assert_abs_diff_eq!(interpolate(&xs, &ys, 2.5).unwrap(), 2.5, epsilon = 1e-12);
    }

    #[test]
    fn out_of_range_reports_bounds() {
        let xs = [6.0, 20.0];
        let ys = [1.024, 1.083];
        let err = interpolate(&xs, &ys, 21.0).unwrap_err();
        assert_eq!(
            err,
            InterpolationError::OutOfRange {
                value: 21.0,
                min: 6.0,
                max: 20.0
            }
        );
        assert_eq!(
            err.to_string(),
            "value 21 is outside the table range (6..20)"
        );
        assert!(interpolate(&xs, &ys, 5.999).is_err());
        assert!(interpolate(&xs, &ys, f64::NAN).is_err());
    }

    #[test]
    fn rejects_malformed_tables() {
        assert_eq!(
            interpolate(&[], &[], 1.0).unwrap_err(),
            InterpolationError::EmptyTable
        );
        assert_eq!(
            interpolate(&[1.0, 2.0], &[1.0], 1.5).unwrap_err(),
            InterpolationError::LengthMismatch { axis: 2, values: 1 }
        );
        assert_eq!(
            interpolate(&[1.0, 3.0, 2.0], &[1.0, 2.0, 3.0], 1.5).unwrap_err(),
            InterpolationError::NotAscending { index: 2 }
        );
        assert_eq!(
            check_axis(&[6.0, f64::NAN, 20.0]).unwrap_err(),
            InterpolationError::NotAscending { index: 1 }
        );
    }

    #[test]
    fn bilinear_grid() {
        let xs = [0.0, 10.0];
        let ys = [0.0, 100.0];
        let zs = vec![vec![0.0, 10.0], vec![100.0, 110.0]];
        assert_eq!(interpolate_2d(&xs, &ys, &zs, 10.0, 100.0).unwrap(), 110.0);
        assert_abs_diff_eq!(
            interpolate_2d(&xs, &ys, &zs, 5.0, 50.0).unwrap(),
            55.0,
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(
            interpolate_2d(&xs, &ys, &zs, 2.0, 0.0).unwrap(),
            2.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn bilinear_rejects_points_outside_grid() {
        let xs = [0.0, 10.0];
        let ys = [0.0, 100.0];
        let zs = vec![vec![0.0, 10.0], vec![100.0, 110.0]];
        assert!(matches!(
            interpolate_2d(&xs, &ys, &zs, 5.0, 120.0),
            Err(InterpolationError::OutOfRange { max, .. }) if max == 100.0
        ));
        let ragged = vec![vec![0.0, 10.0], vec![100.0]];
        assert!(matches!(
            interpolate_2d(&xs, &ys, &ragged, 5.0, 50.0),
            Err(InterpolationError::LengthMismatch { .. })
        ));
    }
}
