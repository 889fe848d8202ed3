//! Dimension and sub-dimension operations
//!
//! Every operation that can affect a dimension with sub-dimensions runs
//! through the rescoring path, so auto-calculated parent scores are never
//! stale relative to their children.

use radar_common::model::{
    Dimension, DimensionPatch, NewDimension, NewSubDimension, SubDimension, SubDimensionPatch,
};
use uuid::Uuid;

use super::{reorder_by_ids, resequence, RadarStore};

impl RadarStore {
    /// Add a dimension to a chart; returns the new id, or `None` for an
    /// unknown chart
    pub async fn add_dimension(&self, chart_id: Uuid, input: NewDimension) -> Option<Uuid> {
        let dimension = Dimension::new(input);
        let id = dimension.id;

        let applied = self
            .mutate_chart_rescoring(chart_id, |chart| {
                chart.dimensions.push(dimension);
                resequence(&mut chart.dimensions);
                true
            })
            .await;

        applied.then_some(id)
    }

    /// Apply a partial update to a dimension; `scores` and `sub_dimensions`
    /// replace wholesale
    pub async fn update_dimension(
        &self,
        chart_id: Uuid,
        dimension_id: Uuid,
        patch: DimensionPatch,
    ) {
        self.mutate_chart_rescoring(chart_id, |chart| {
            match chart
                .dimensions
                .iter_mut()
                .find(|dimension| dimension.id == dimension_id)
            {
                Some(dimension) => {
                    dimension.apply(patch);
                    true
                }
                None => false,
            }
        })
        .await;
    }

    /// Remove a dimension
    pub async fn delete_dimension(&self, chart_id: Uuid, dimension_id: Uuid) {
        self.mutate_chart(chart_id, |chart| {
            let before = chart.dimensions.len();
            chart.dimensions.retain(|dimension| dimension.id != dimension_id);
            if chart.dimensions.len() == before {
                return false;
            }
            resequence(&mut chart.dimensions);
            true
        })
        .await;
    }

    /// Assign dimension display order from the given id sequence
    pub async fn reorder_dimensions(&self, chart_id: Uuid, dimension_ids: &[Uuid]) {
        self.mutate_chart(chart_id, |chart| {
            reorder_by_ids(&mut chart.dimensions, dimension_ids);
            true
        })
        .await;
    }

    /// Set one vendor's score on a dimension.
    ///
    /// On a dimension with sub-dimensions the entry is immediately
    /// overwritten by recomputation; derived scores are not authorable.
    pub async fn update_dimension_score(
        &self,
        chart_id: Uuid,
        dimension_id: Uuid,
        vendor_id: Uuid,
        score: f64,
    ) {
        self.mutate_chart_rescoring(chart_id, |chart| {
            match chart
                .dimensions
                .iter_mut()
                .find(|dimension| dimension.id == dimension_id)
            {
                Some(dimension) => {
                    dimension.scores.insert(vendor_id, score);
                    true
                }
                None => false,
            }
        })
        .await;
    }

    /// Add a sub-dimension under a dimension; returns the new id, or
    /// `None` when chart or dimension is unknown
    pub async fn add_sub_dimension(
        &self,
        chart_id: Uuid,
        dimension_id: Uuid,
        input: NewSubDimension,
    ) -> Option<Uuid> {
        let sub = SubDimension::new(input);
        let id = sub.id;

        let applied = self
            .mutate_chart_rescoring(chart_id, |chart| {
                match chart
                    .dimensions
                    .iter_mut()
                    .find(|dimension| dimension.id == dimension_id)
                {
                    Some(dimension) => {
                        dimension.sub_dimensions.push(sub);
                        resequence(&mut dimension.sub_dimensions);
                        true
                    }
                    None => false,
                }
            })
            .await;

        applied.then_some(id)
    }

    /// Apply a partial update to a sub-dimension
    pub async fn update_sub_dimension(
        &self,
        chart_id: Uuid,
        dimension_id: Uuid,
        sub_dimension_id: Uuid,
        patch: SubDimensionPatch,
    ) {
        self.mutate_chart_rescoring(chart_id, |chart| {
            match find_sub(chart.dimensions.as_mut_slice(), dimension_id, sub_dimension_id) {
                Some(sub) => {
                    sub.apply(patch);
                    true
                }
                None => false,
            }
        })
        .await;
    }

    /// Remove a sub-dimension
    pub async fn delete_sub_dimension(
        &self,
        chart_id: Uuid,
        dimension_id: Uuid,
        sub_dimension_id: Uuid,
    ) {
        self.mutate_chart_rescoring(chart_id, |chart| {
            match chart
                .dimensions
                .iter_mut()
                .find(|dimension| dimension.id == dimension_id)
            {
                Some(dimension) => {
                    let before = dimension.sub_dimensions.len();
                    dimension
                        .sub_dimensions
                        .retain(|sub| sub.id != sub_dimension_id);
                    if dimension.sub_dimensions.len() == before {
                        return false;
                    }
                    resequence(&mut dimension.sub_dimensions);
                    true
                }
                None => false,
            }
        })
        .await;
    }

    /// Assign sub-dimension display order from the given id sequence
    pub async fn reorder_sub_dimensions(
        &self,
        chart_id: Uuid,
        dimension_id: Uuid,
        sub_dimension_ids: &[Uuid],
    ) {
        self.mutate_chart_rescoring(chart_id, |chart| {
            match chart
                .dimensions
                .iter_mut()
                .find(|dimension| dimension.id == dimension_id)
            {
                Some(dimension) => {
                    reorder_by_ids(&mut dimension.sub_dimensions, sub_dimension_ids);
                    true
                }
                None => false,
            }
        })
        .await;
    }

    /// Set one vendor's score on a sub-dimension; the parent dimension's
    /// derived score follows immediately
    pub async fn update_sub_dimension_score(
        &self,
        chart_id: Uuid,
        dimension_id: Uuid,
        sub_dimension_id: Uuid,
        vendor_id: Uuid,
        score: f64,
    ) {
        self.mutate_chart_rescoring(chart_id, |chart| {
            match find_sub(chart.dimensions.as_mut_slice(), dimension_id, sub_dimension_id) {
                Some(sub) => {
                    sub.scores.insert(vendor_id, score);
                    true
                }
                None => false,
            }
        })
        .await;
    }
}

fn find_sub(
    dimensions: &mut [Dimension],
    dimension_id: Uuid,
    sub_dimension_id: Uuid,
) -> Option<&mut SubDimension> {
    dimensions
        .iter_mut()
        .find(|dimension| dimension.id == dimension_id)?
        .sub_dimensions
        .iter_mut()
        .find(|sub| sub.id == sub_dimension_id)
}
