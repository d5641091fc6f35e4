use std::marker::PhantomData;

fn short_type_name<T>() -> &'static str {
    let type_name = std::any::type_name::<T>();
    match type_name.rfind(':') {
        Some(pos) => &type_name[(pos + 1)..],
        None => type_name,
    }
}

/// Rounds `size` up to the next multiple of `alignment` (a power of two)
pub fn align_to(size: u64, alignment: u64) -> u64 {
    let alignment = alignment.max(1);
    size.div_ceil(alignment) * alignment
}

/// Typed wrapper around a single uniform value
pub struct UniformBuffer<Content> {
    buffer: wgpu::Buffer,
    content_type: PhantomData<Content>,
    previous_content: Vec<u8>,
}

impl<Content: bytemuck::Pod> UniformBuffer<Content> {
    pub fn new(device: &wgpu::Device) -> Self {
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(&format!("UniformBuffer: {}", short_type_name::<Content>())),
            size: std::mem::size_of::<Content>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        UniformBuffer {
            buffer,
            content_type: PhantomData,
            previous_content: Vec::new(),
        }
    }

    /// Writes `content`, skipping the upload when nothing changed
    pub fn update_content(&mut self, queue: &wgpu::Queue, content: Content) {
        let new_content = bytemuck::bytes_of(&content);
        if self.previous_content == new_content {
            return;
        }
        queue.write_buffer(&self.buffer, 0, new_content);
        self.previous_content = new_content.to_vec();
    }

    pub fn binding_resource(&self) -> wgpu::BindingResource {
        self.buffer.as_entire_binding()
    }
}

/// Array of uniform values, one per draw, bound with a dynamic offset
///
/// Each element occupies `stride` bytes so offsets satisfy the device's
/// uniform offset alignment. The buffer grows when a frame needs more
/// elements; callers must rebuild bind groups when [`ensure_capacity`]
/// returns true.
///
/// [`ensure_capacity`]: DynamicUniformBuffer::ensure_capacity
pub struct DynamicUniformBuffer<Content> {
    buffer: wgpu::Buffer,
    content_type: PhantomData<Content>,
    stride: u64,
    capacity: usize,
    staging: Vec<u8>,
}

impl<Content: bytemuck::Pod> DynamicUniformBuffer<Content> {
    pub fn new(device: &wgpu::Device, capacity: usize) -> Self {
        let alignment = device.limits().min_uniform_buffer_offset_alignment as u64;
        let stride = align_to(std::mem::size_of::<Content>() as u64, alignment);
        let capacity = capacity.max(1);
        Self {
            buffer: Self::create_buffer(device, stride, capacity),
            content_type: PhantomData,
            stride,
            capacity,
            staging: Vec::new(),
        }
    }

    fn create_buffer(device: &wgpu::Device, stride: u64, capacity: usize) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(&format!("DynamicUniformBuffer: {}", short_type_name::<Content>())),
            size: stride * capacity as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    /// Grows to hold `count` elements; returns true when the buffer was replaced
    pub fn ensure_capacity(&mut self, device: &wgpu::Device, count: usize) -> bool {
        if count <= self.capacity {
            return false;
        }
        let capacity = count.next_power_of_two();
        log::debug!(
            "growing {} from {} to {} elements",
            short_type_name::<Content>(),
            self.capacity,
            capacity
        );
        self.buffer = Self::create_buffer(device, self.stride, capacity);
        self.capacity = capacity;
        true
    }

    /// Uploads `items` packed at `stride`; extra items beyond capacity are dropped
    pub fn write(&mut self, queue: &wgpu::Queue, items: &[Content]) {
        let count = items.len().min(self.capacity);
        if count == 0 {
            return;
        }
        let stride = self.stride as usize;
        self.staging.clear();
        self.staging.resize(stride * count, 0);
        for (index, item) in items[..count].iter().enumerate() {
            let bytes = bytemuck::bytes_of(item);
            self.staging[index * stride..index * stride + bytes.len()].copy_from_slice(bytes);
        }
        queue.write_buffer(&self.buffer, 0, &self.staging);
    }

    /// Dynamic offset of element `index`
    pub fn offset(&self, index: usize) -> wgpu::DynamicOffset {
        (index as u64 * self.stride) as wgpu::DynamicOffset
    }

    /// Binding covering exactly one element
    pub fn binding_resource(&self) -> wgpu::BindingResource {
        wgpu::BindingResource::Buffer(wgpu::BufferBinding {
            buffer: &self.buffer,
            offset: 0,
            size: wgpu::BufferSize::new(std::mem::size_of::<Content>() as u64),
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aligns_up_to_the_offset_alignment() {
        assert_eq!(align_to(96, 256), 256);
        assert_eq!(align_to(256, 256), 256);
        assert_eq!(align_to(257, 256), 512);
        assert_eq!(align_to(12, 0), 12);
    }

    #[test]
    fn type_names_are_shortened() {
        assert_eq!(short_type_name::<std::string::String>(), "String");
        assert_eq!(short_type_name::<u32>(), "u32");
    }
}
