//! Glyph texts hung on the tree, consumed in order.

/// Spring-themed characters, one glyph each.
pub const DEFAULT_PALETTE: &str = concat!(
    "吹绿草美莺啼蝶舞草长溪潺雨润露莹",
    "晴柔阳煦芳菲杏粉梨白兰香樱飘萌芽",
    "碧翠绯霞晖韶光苏欣悦醉梦诗画环佩",
    "铃铛翩芊苒暄清悠婉妙灵秀雅韵华韶",
    "鼓乐琴瑟嫣娆媚灿皎皎融怡宁谧乐欢",
    "歌谣笛声曲调舞袖纱轻烟波涟漪舟摇",
    "桥影亭台楼阁径幽林深泉鸣石润吻亲",
    "松竹梅鹤云悠天蓝水秀山青野阔田园",
    "牧童笛远村烟晨曦暮霭星辰箫笛笙簧",
    "月皎灯火茶烟书卷墨香笔韵纸鸢莺燕",
    "蜂蜜蛙鸣蝉唱萤火鱼跃荷摇诗联谜语",
    "梧桐枫丹菊黄桂馥荔枝葡萄瓜甜抱拥",
    "搂抚摸李酸杏熟桃饱梨脆樱甜莓鲜笋",
    "嫩木匏音律调茶新酒醇糕香饼酥糖甜",
    "蜜甘酥脆韵歌词曲赋羹暖汤热炉温被",
    "暖枕安眠甜梦美明晨昏昼夜晓暮希冀",
    "期待等候守护光芒辉煌耀闪烁亮明朗",
    "照衣轻衫薄裙飘带舞鞋绣袜罗钗玉墨",
    "盒水滴笔洗印泥色彩朱砂金粉银箔青",
    "绿蓝靛紫橙黄赤白黑灰褐茶香醉梦诗",
    "纸鸢鹞翔飞絮杨絮萍浮舟荡桨摇梅鹤",
    "桥影亭台楼阁园林径幽泉鸣石涧松竹",
    "晨曦朝暮晚昏星月灯火烛照明朗云霞",
    "衣轻衫薄袖裙带钗佩铃铛鼓钟琴霓虹",
    "棋书画印砚笔墨纸砚台架镇盒洗雾霭",
    "色彩朱砂金粉银蓝靛紫橙黄白黑烟波",
    "甜蜜酥脆糕饼糖羹汤酒醇茗新鲜涟漪",
    "闲悠逸恬静安宁康泰福寿喜乐欢画歌",
    "咏吟诵读写作赋词联谜戏博弈射谣笛",
    "礼仪仁义德善美真慧灵巧妙雅韵声曲",
);

/// Iterates the glyph texts of `palette` in order.
pub fn glyphs(palette: &str) -> impl Iterator<Item = char> + '_ {
    palette.chars().filter(|c| !c.is_whitespace() && !c.is_control())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_palette_has_480_glyphs() {
        assert_eq!(glyphs(DEFAULT_PALETTE).count(), 480);
        assert_eq!(glyphs(DEFAULT_PALETTE).next(), Some('吹'));
        assert_eq!(glyphs(DEFAULT_PALETTE).last(), Some('曲'));
    }

    #[test]
    fn whitespace_is_not_a_glyph() {
        let texts: String = glyphs("a b\n\tc").collect();
        assert_eq!(texts, "abc");
    }
}
