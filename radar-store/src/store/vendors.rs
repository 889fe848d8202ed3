//! Vendor operations

use radar_common::model::{NewVendor, Vendor, VendorPatch};
use uuid::Uuid;

use super::{reorder_by_ids, resequence, RadarStore};

impl RadarStore {
    /// Add a vendor to a chart; returns the new id, or `None` for an
    /// unknown chart
    pub async fn add_vendor(&self, chart_id: Uuid, input: NewVendor) -> Option<Uuid> {
        let vendor = Vendor::new(input);
        let id = vendor.id;

        let applied = self
            .mutate_chart_rescoring(chart_id, |chart| {
                chart.vendors.push(vendor);
                resequence(&mut chart.vendors);
                true
            })
            .await;

        applied.then_some(id)
    }

    /// Apply a partial update to a vendor
    pub async fn update_vendor(&self, chart_id: Uuid, vendor_id: Uuid, patch: VendorPatch) {
        self.mutate_chart(chart_id, |chart| {
            match chart.vendors.iter_mut().find(|vendor| vendor.id == vendor_id) {
                Some(vendor) => {
                    vendor.apply(patch);
                    true
                }
                None => false,
            }
        })
        .await;
    }

    /// Remove a vendor and every score it had in this chart.
    ///
    /// One traversal of the dimension tree drops the vendor's key from
    /// every dimension and sub-dimension score map, keeping the cascade
    /// atomic with the removal.
    pub async fn delete_vendor(&self, chart_id: Uuid, vendor_id: Uuid) {
        self.mutate_chart(chart_id, |chart| {
            let before = chart.vendors.len();
            chart.vendors.retain(|vendor| vendor.id != vendor_id);
            if chart.vendors.len() == before {
                return false;
            }
            resequence(&mut chart.vendors);

            for dimension in chart.dimensions.iter_mut() {
                dimension.scores.remove(&vendor_id);
                for sub in dimension.sub_dimensions.iter_mut() {
                    sub.scores.remove(&vendor_id);
                }
            }
            true
        })
        .await;
    }

    /// Assign vendor display order from the given id sequence
    pub async fn reorder_vendors(&self, chart_id: Uuid, vendor_ids: &[Uuid]) {
        self.mutate_chart(chart_id, |chart| {
            reorder_by_ids(&mut chart.vendors, vendor_ids);
            true
        })
        .await;
    }
}
