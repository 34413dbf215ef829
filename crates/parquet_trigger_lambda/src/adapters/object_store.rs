use crate::runtime::contract::ObjectEntry;

pub trait ObjectLister {
    /// Lists the bucket in the order returned by the storage service.
    fn list_objects(&self, container: &str) -> Result<Vec<ObjectEntry>, String>;
}
