//! Fixed-width records of the ICO container.

use std::io::{self, Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::size::IconSize;

pub const HEADER_LEN: usize = 6;
pub const DIR_ENTRY_LEN: usize = 16;

/// Resource type stored in the header. 2 would mean a cursor.
pub const RESOURCE_TYPE_ICON: u16 = 1;

/// Planes and bit depth written for every frame: true-color RGBA, no palette.
pub const COLOR_PLANES: u16 = 1;
pub const BITS_PER_PIXEL: u16 = 32;

/// The 6-byte `ICONDIR` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconDirHeader {
    pub reserved: u16,
    pub resource_type: u16,
    pub count: u16,
}

impl IconDirHeader {
    pub fn icon(count: u16) -> Self {
        IconDirHeader {
            reserved: 0,
            resource_type: RESOURCE_TYPE_ICON,
            count,
        }
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_u16::<LittleEndian>(self.reserved)?;
        writer.write_u16::<LittleEndian>(self.resource_type)?;
        writer.write_u16::<LittleEndian>(self.count)?;
        Ok(())
    }

    pub fn read_from<R: Read>(reader: &mut R) -> io::Result<Self> {
        Ok(IconDirHeader {
            reserved: reader.read_u16::<LittleEndian>()?,
            resource_type: reader.read_u16::<LittleEndian>()?,
            count: reader.read_u16::<LittleEndian>()?,
        })
    }
}

/// One 16-byte `ICONDIRENTRY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirEntry {
    pub width: u8,
    pub height: u8,
    pub color_count: u8,
    pub reserved: u8,
    pub color_planes: u16,
    pub bits_per_pixel: u16,
    pub data_size: u32,
    pub data_offset: u32,
}

impl DirEntry {
    /// Entry for a square true-color frame.
    pub fn square(size: IconSize, data_size: u32, data_offset: u32) -> Self {
        let edge = size.directory_byte();
        DirEntry {
            width: edge,
            height: edge,
            color_count: 0,
            reserved: 0,
            color_planes: COLOR_PLANES,
            bits_per_pixel: BITS_PER_PIXEL,
            data_size,
            data_offset,
        }
    }

    /// Pixel width, with the stored 0 read back as 256.
    pub fn pixel_width(&self) -> u32 {
        IconSize::from_directory_byte(self.width).get()
    }

    pub fn pixel_height(&self) -> u32 {
        IconSize::from_directory_byte(self.height).get()
    }

    /// Byte range of this entry's payload within the file, or `None` when
    /// the end does not fit in `usize`.
    pub fn data_range(&self) -> Option<std::ops::Range<usize>> {
        let start = usize::try_from(self.data_offset).ok()?;
        let end = start.checked_add(usize::try_from(self.data_size).ok()?)?;
        Some(start..end)
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_u8(self.width)?;
        writer.write_u8(self.height)?;
        writer.write_u8(self.color_count)?;
        writer.write_u8(self.reserved)?;
        writer.write_u16::<LittleEndian>(self.color_planes)?;
        writer.write_u16::<LittleEndian>(self.bits_per_pixel)?;
        writer.write_u32::<LittleEndian>(self.data_size)?;
        writer.write_u32::<LittleEndian>(self.data_offset)?;
        Ok(())
    }

    pub fn read_from<R: Read>(reader: &mut R) -> io::Result<Self> {
        Ok(DirEntry {
            width: reader.read_u8()?,
            height: reader.read_u8()?,
            color_count: reader.read_u8()?,
            reserved: reader.read_u8()?,
            color_planes: reader.read_u16::<LittleEndian>()?,
            bits_per_pixel: reader.read_u16::<LittleEndian>()?,
            data_size: reader.read_u32::<LittleEndian>()?,
            data_offset: reader.read_u32::<LittleEndian>()?,
        })
    }
}
